//! Error handling module for sheetport.
//!
//! This module provides the error types used across the crate:
//! - A single top-level [`SheetportError`] wrapping more specific kinds
//! - Conversions from the spreadsheet writer and CSV reader errors
//! - The crate-wide [`Result`] alias
//!
//! Note that export failures observed inside a running task are not
//! returned to the caller as `Result` values; they are reported on the
//! task's event channel (see `export::events`). The types here cover
//! everything that is a plain fallible call.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, ExportError, InputError, Result, SheetportError};
