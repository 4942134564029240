//! Export module for background spreadsheet export operations
//!
//! This module turns an in-memory row set into a spreadsheet artifact on
//! disk, off the caller's thread, with progress and error reporting over
//! a typed event channel.
//!
//! # Architecture
//!
//! The export system is built on three main components:
//!
//! 1. **ExportTask**: one unit of work — serializes a row set through the
//!    sheet writer, polling a cooperative cancellation token at safe
//!    points and emitting [`ExportEvent`]s
//! 2. **SheetWriter**: the "write sheet" capability — workbook setup,
//!    header styling, column auto-fit, row writes, save
//! 3. **Retention**: prunes older artifacts from the output folder before
//!    each save
//!
//! These are orchestrated by the **ExportCoordinator**, which owns at
//! most one live task at a time: starting a new export first asks the
//! previous task to stop (task supersession), then schedules the new one
//! and relays its events to the coordinator's outward channel.

use std::path::PathBuf;

pub mod coordinator;
pub mod events;
pub mod retention;
pub mod sheet;
pub mod task;

pub use coordinator::ExportCoordinator;
pub use events::ExportEvent;
pub use sheet::SheetWriter;
pub use task::ExportTask;

use crate::config::ExportConfig;

/// One export request: a fully materialized row set plus its header.
///
/// Every row is expected to have the same cell count as `header`; a
/// mismatch is not validated up front and surfaces from within the task.
/// The request is owned by the task and never mutated.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Data rows, in output order.
    pub rows: Vec<Vec<String>>,

    /// Column labels for the styled header row.
    pub header: Vec<String>,

    /// Worksheet name; also used (sanitized) in the artifact file name.
    pub table_name: String,
}

/// Runtime settings shared by every task a coordinator schedules.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Folder receiving the exported artifacts; created on demand.
    pub output_dir: PathBuf,

    /// Retention depth passed to [`retention::delete_old_outputs`].
    pub keep_recent: usize,

    /// Hand the saved file to the platform open handler.
    pub open_after_save: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from(&ExportConfig::default())
    }
}

impl From<&ExportConfig> for ExportSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            keep_recent: config.keep_recent,
            open_after_save: config.open_after_save,
        }
    }
}
