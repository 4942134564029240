//! Background export task
//!
//! One `ExportTask` serializes one row set to a spreadsheet artifact.
//! All the algorithmic weight of the export subsystem lives here: the
//! cancellation-aware row loop, the progress cadence, the best-effort
//! error policy, and the retention/save/open tail.
//!
//! Cancellation is cooperative and polled at exactly three safe points:
//! before the row loop starts, before each row, and once after the loop.
//! A task that is already past the last check (saving the workbook)
//! completes its save-then-open even if stopped — "stop as soon as
//! convenient", not "stop immediately".

use std::path::PathBuf;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::export::events::ExportEvent;
use crate::export::retention;
use crate::export::sheet::SheetWriter;
use crate::export::{ExportRequest, ExportSettings};
use crate::utils;

/// Emit a progress event every this many rows written.
pub const PROGRESS_INTERVAL: u64 = 1000;

/// A single scheduled export of one row set.
///
/// Created by the coordinator immediately before scheduling and consumed
/// by [`run`](ExportTask::run); a task is never resumed after it
/// terminates.
pub struct ExportTask {
    request: ExportRequest,
    settings: ExportSettings,
    cancel: CancellationToken,
    events: UnboundedSender<ExportEvent>,
}

impl ExportTask {
    pub fn new(
        request: ExportRequest,
        settings: ExportSettings,
        cancel: CancellationToken,
        events: UnboundedSender<ExportEvent>,
    ) -> Self {
        Self {
            request,
            settings,
            cancel,
            events,
        }
    }

    /// Run the export to completion, cancellation, or surfaced error.
    ///
    /// Never panics and never propagates a fault to the scheduler: any
    /// failure outside the best-effort row loop is logged and reported
    /// once on the event channel, message carrying the original error
    /// and the full row payload.
    pub fn run(self) {
        if let Err(err) = self.export() {
            error!("export of '{}' failed: {}", self.request.table_name, err);
            let message = format!(
                "Error exporting query results: {}; rows: {:?}",
                err, self.request.rows
            );
            self.emit(ExportEvent::Error { message });
        }
    }

    fn export(&self) -> Result<()> {
        utils::fs::ensure_dir_exists(&self.settings.output_dir)?;

        let mut writer = SheetWriter::create(&self.request.table_name)?;
        if let Err(err) = writer.autofit_columns(&self.request.rows, &self.request.header) {
            debug!("column width formatting skipped: {}", err);
        }
        writer.write_header(&self.request.header)?;

        let mut written: u64 = 0;
        if self.cancel.is_cancelled() {
            return Ok(());
        }
        for row in &self.request.rows {
            if self.cancel.is_cancelled() {
                return Ok(());
            }
            written += 1;
            if let Err(err) = writer.write_row(written as u32, row) {
                // best effort: keep what is written, end the loop
                debug!("row {} not written, ending row loop: {}", written, err);
                break;
            }
            if written % PROGRESS_INTERVAL == 0 {
                self.emit(ExportEvent::Progress {
                    rows_written: written,
                });
            }
        }
        self.emit(ExportEvent::Progress {
            rows_written: written,
        });

        if self.cancel.is_cancelled() {
            return Ok(());
        }
        let dest = self.output_path();
        retention::delete_old_outputs(&self.settings.output_dir, self.settings.keep_recent)?;
        writer.save(&dest)?;
        if self.settings.open_after_save {
            utils::launch::open_path(&dest)?;
        }
        info!("exported {} rows to {}", written, dest.display());
        Ok(())
    }

    fn output_path(&self) -> PathBuf {
        let table = utils::string::sanitize_table_name(&self.request.table_name);
        let stamp = utils::time::artifact_timestamp();
        self.settings
            .output_dir
            .join(format!("tmp_{}_{}.xls", table, stamp))
    }

    fn emit(&self, event: ExportEvent) {
        // the receiver may already be gone when the caller shut down
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn settings(dir: &Path) -> ExportSettings {
        ExportSettings {
            output_dir: dir.to_path_buf(),
            keep_recent: 10,
            open_after_save: false,
        }
    }

    fn request(rows: Vec<Vec<String>>, header: &[&str], table_name: &str) -> ExportRequest {
        ExportRequest {
            rows,
            header: header.iter().map(|label| label.to_string()).collect(),
            table_name: table_name.to_string(),
        }
    }

    fn task_with_token(
        request: ExportRequest,
        settings: ExportSettings,
        cancel: CancellationToken,
    ) -> (ExportTask, UnboundedReceiver<ExportEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ExportTask::new(request, settings, cancel, tx), rx)
    }

    fn collect(rx: &mut UnboundedReceiver<ExportEvent>) -> Vec<ExportEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn saved_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_successful_export_emits_final_progress() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![
            vec!["a".to_string(), "1".to_string()],
            vec!["b".to_string(), "2".to_string()],
        ];
        let (task, mut rx) = task_with_token(
            request(rows, &["Name", "Val"], "T 1"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        task.run();

        assert_eq!(collect(&mut rx), vec![ExportEvent::Progress { rows_written: 2 }]);
        let files = saved_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("tmp_T_1_"));
        assert!(files[0].ends_with(".xls"));
    }

    #[test]
    fn test_progress_cadence_every_thousand_rows() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<Vec<String>> = (0..2500).map(|i| vec![i.to_string()]).collect();
        let (task, mut rx) = task_with_token(
            request(rows, &["n"], "big"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        task.run();

        assert_eq!(
            collect(&mut rx),
            vec![
                ExportEvent::Progress { rows_written: 1000 },
                ExportEvent::Progress { rows_written: 2000 },
                ExportEvent::Progress { rows_written: 2500 },
            ]
        );
        assert_eq!(saved_files(dir.path()).len(), 1);
    }

    #[test]
    fn test_final_progress_is_unconditional_at_exact_interval() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<Vec<String>> = (0..1000).map(|i| vec![i.to_string()]).collect();
        let (task, mut rx) = task_with_token(
            request(rows, &["n"], "exact"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        task.run();

        // the in-loop event at the interval plus the final event carry
        // the same count; the sequence stays non-decreasing
        assert_eq!(
            collect(&mut rx),
            vec![
                ExportEvent::Progress { rows_written: 1000 },
                ExportEvent::Progress { rows_written: 1000 },
            ]
        );
    }

    #[test]
    fn test_stop_before_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let (task, mut rx) = task_with_token(
            request(vec![vec!["a".to_string()]], &["c"], "t"),
            settings(dir.path()),
            cancel,
        );

        task.run();

        assert!(collect(&mut rx).is_empty());
        assert!(saved_files(dir.path()).is_empty());
    }

    #[test]
    fn test_row_failure_is_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let mut rows: Vec<Vec<String>> = (0..10).map(|i| vec![i.to_string()]).collect();
        // the writer rejects strings longer than 32767 characters
        rows[4] = vec!["y".repeat(40_000)];
        let (task, mut rx) = task_with_token(
            request(rows, &["c"], "partial"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        task.run();

        // the failing row counts as processed; no error event fires and
        // the artifact with the surviving rows is still saved
        assert_eq!(collect(&mut rx), vec![ExportEvent::Progress { rows_written: 5 }]);
        assert_eq!(saved_files(dir.path()).len(), 1);
    }

    #[test]
    fn test_setup_failure_surfaces_as_error_event() {
        let dir = tempfile::tempdir().unwrap();
        // '[' is rejected by the worksheet naming rules
        let (task, mut rx) = task_with_token(
            request(vec![vec!["a".to_string()]], &["c"], "bad[name"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        task.run();

        let events = collect(&mut rx);
        assert_eq!(events.len(), 1);
        match &events[0] {
            ExportEvent::Error { message } => {
                assert!(message.starts_with("Error exporting query results:"));
                assert!(message.contains("rows:"));
            }
            other => panic!("expected error event, got {:?}", other),
        }
        assert!(saved_files(dir.path()).is_empty());
    }

    #[test]
    fn test_empty_row_set_still_saves_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let (task, mut rx) = task_with_token(
            request(Vec::new(), &["a", "b"], "empty"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        // width auto-fit fails on the empty set and is swallowed
        task.run();

        assert_eq!(collect(&mut rx), vec![ExportEvent::Progress { rows_written: 0 }]);
        assert_eq!(saved_files(dir.path()).len(), 1);
    }

    #[test]
    fn test_blank_cells_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let rows = vec![
            vec!["a".to_string(), String::new()],
            vec![String::new(), "  2  ".to_string()],
        ];
        let (task, mut rx) = task_with_token(
            request(rows, &["x", "y"], "blanks"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        task.run();

        assert_eq!(collect(&mut rx), vec![ExportEvent::Progress { rows_written: 2 }]);
        assert_eq!(saved_files(dir.path()).len(), 1);
    }

    #[test]
    fn test_output_path_shape() {
        let dir = tempfile::tempdir().unwrap();
        let (task, _rx) = task_with_token(
            request(Vec::new(), &["c"], "My Table"),
            settings(dir.path()),
            CancellationToken::new(),
        );

        let name = task
            .output_path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with("tmp_My_Table_"));
        assert!(name.ends_with(".xls"));
        // prefix + fixed-width timestamp + suffix
        assert_eq!(name.len(), "tmp_My_Table_".len() + 17 + ".xls".len());
    }

    #[test]
    fn test_retention_runs_before_save() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tmp_t_2020-01-01.000000.xls"), b"x").unwrap();
        std::fs::write(dir.path().join("tmp_t_2020-01-02.000000.xls"), b"x").unwrap();

        let mut settings = settings(dir.path());
        settings.keep_recent = 1;
        let (task, _rx) = task_with_token(
            request(vec![vec!["a".to_string()]], &["c"], "t"),
            settings,
            CancellationToken::new(),
        );

        task.run();

        let files = saved_files(dir.path());
        // oldest pre-existing artifact pruned, newest kept, new one saved
        assert_eq!(files.len(), 2);
        assert!(!files.contains(&"tmp_t_2020-01-01.000000.xls".to_string()));
        assert!(files.contains(&"tmp_t_2020-01-02.000000.xls".to_string()));
    }
}
