//! Typed events emitted by a running export task.
//!
//! Each task owns the sending half of an unbounded channel; the
//! coordinator relays every event verbatim onto its own outward channel.
//! Events deliberately carry no task identity: a consumer that has just
//! superseded a task can still receive that task's trailing events.

/// Event emitted by an [`ExportTask`](super::ExportTask) while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    /// Cumulative number of data rows written so far.
    ///
    /// Emitted at every positive multiple of 1000 rows and once after the
    /// row loop with the final count. Counts are non-decreasing within a
    /// single task.
    Progress { rows_written: u64 },

    /// The export failed; `message` carries the underlying error plus a
    /// dump of the offending row set.
    Error { message: String },
}

impl ExportEvent {
    /// True for the `Error` variant.
    pub fn is_error(&self) -> bool {
        matches!(self, ExportEvent::Error { .. })
    }
}
