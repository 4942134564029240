//! Sheetport Library
//!
//! This library provides the core functionality of sheetport, a background
//! spreadsheet exporter for tabular query results. It can be used as a
//! standalone library to add export-to-spreadsheet support to other tools.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `export`: The export coordinator, task, sheet writer and retention
//! - `utils`: Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use sheetport::export::{ExportCoordinator, ExportRequest, ExportSettings};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (mut coordinator, mut events) = ExportCoordinator::new(ExportSettings::default());
//!
//!     coordinator.start_export(ExportRequest {
//!         rows: vec![vec!["a".into(), "1".into()]],
//!         header: vec!["Name".into(), "Val".into()],
//!         table_name: "T 1".into(),
//!     });
//!
//!     coordinator.join_current().await;
//!     drop(coordinator);
//!     while let Some(event) = events.recv().await {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, SheetportError};
pub use export::{ExportCoordinator, ExportEvent, ExportRequest, ExportSettings, ExportTask};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
