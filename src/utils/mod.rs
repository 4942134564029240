//! Utility functions and helpers for sheetport
//!
//! This module provides common utility functions used throughout the application:
//! - String sanitization for artifact names
//! - Timestamp formatting for output files
//! - File system helpers
//! - Platform "open file" hand-off

use crate::error::Result;

/// String utilities
pub mod string {
    /// Sanitize a table name for use in an artifact file name.
    ///
    /// Spaces are replaced with underscores; everything else is kept as-is
    /// (the worksheet keeps the original name, only the file name is
    /// sanitized).
    pub fn sanitize_table_name(name: &str) -> String {
        name.replace(' ', "_")
    }
}

/// Time utilities
pub mod time {
    use chrono::Local;

    /// Timestamp segment embedded in artifact file names.
    ///
    /// The format is fixed-width (`YYYY-MM-DD.HHMMSS`), so artifact names
    /// for the same table sort lexicographically by age.
    pub fn artifact_timestamp() -> String {
        Local::now().format("%Y-%m-%d.%H%M%S").to_string()
    }
}

/// File system utilities
pub mod fs {
    use super::*;
    use std::path::Path;

    /// Ensure directory exists, create if not
    ///
    /// # Arguments
    /// * `path` - Directory path
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        Ok(())
    }
}

/// Platform launch utilities
pub mod launch {
    use std::path::Path;
    use std::process::Command;

    use tracing::debug;

    use crate::error::{ExportError, Result};

    /// Hand a file path to the platform's default open handler.
    ///
    /// The handler process is spawned and not waited on; only a failure to
    /// spawn is reported.
    pub fn open_path(path: &Path) -> Result<()> {
        debug!("opening {}", path.display());

        #[cfg(target_os = "macos")]
        let spawned = Command::new("open").arg(path).spawn();

        #[cfg(target_os = "windows")]
        let spawned = Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn();

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let spawned = Command::new("xdg-open").arg(path).spawn();

        spawned
            .map(drop)
            .map_err(|e| ExportError::OpenFailed(format!("{}: {}", path.display(), e)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_table_name() {
        assert_eq!(string::sanitize_table_name("T 1"), "T_1");
        assert_eq!(string::sanitize_table_name("orders"), "orders");
        assert_eq!(string::sanitize_table_name("a b c"), "a_b_c");
    }

    #[test]
    fn test_artifact_timestamp_shape() {
        let stamp = time::artifact_timestamp();
        // YYYY-MM-DD.HHMMSS
        assert_eq!(stamp.len(), 17);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[7..8], "-");
        assert_eq!(&stamp[10..11], ".");
        assert!(stamp[11..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_ensure_dir_exists() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        fs::ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());

        // idempotent on an existing directory
        fs::ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
