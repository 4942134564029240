//! Output folder retention
//!
//! Every successful export saves a new timestamped artifact; this module
//! bounds the output folder's growth by pruning all but the newest few
//! artifacts just before each save.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;

/// Artifact names look like `tmp_<table>_<YYYY-MM-DD.HHMMSS>.xls`.
const ARTIFACT_PREFIX: &str = "tmp_";
const ARTIFACT_SUFFIX: &str = ".xls";

/// The timestamp is the segment after the last underscore; it is
/// fixed-width, so it orders lexicographically by age.
fn timestamp_key(name: &str) -> &str {
    name.rsplit('_').next().unwrap_or(name)
}

/// Delete old export artifacts from `folder`, keeping the `keep_recent`
/// newest ones.
///
/// Only files matching the artifact naming pattern are considered; other
/// files in the folder are never touched. A file that cannot be deleted
/// is logged and skipped. Returns the number of files deleted.
pub fn delete_old_outputs(folder: &Path, keep_recent: usize) -> Result<usize> {
    let mut artifacts: Vec<(String, PathBuf)> = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(ARTIFACT_PREFIX)
            && name.ends_with(ARTIFACT_SUFFIX)
            && entry.path().is_file()
        {
            artifacts.push((name, entry.path()));
        }
    }

    if artifacts.len() <= keep_recent {
        return Ok(0);
    }

    // newest first
    artifacts.sort_by(|a, b| timestamp_key(&b.0).cmp(timestamp_key(&a.0)));

    let mut deleted = 0;
    for (name, path) in artifacts.into_iter().skip(keep_recent) {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("pruned old artifact {}", name);
                deleted += 1;
            }
            Err(err) => warn!("failed to prune {}: {}", path.display(), err),
        }
    }
    Ok(deleted)
}
