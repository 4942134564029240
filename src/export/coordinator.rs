//! Export coordinator for managing the active export task
//!
//! The coordinator is the single public entry point of the export
//! subsystem. It owns at most one live task handle at a time
//! (last-writer-wins): starting a new export first asks the current task
//! to stop, then schedules the replacement and relays its events onto
//! the coordinator's outward channel.
//!
//! Events are forwarded verbatim and carry no task identity — a trailing
//! progress or error event from a just-superseded task can still reach
//! the outward channel after its replacement has started.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::export::events::ExportEvent;
use crate::export::task::ExportTask;
use crate::export::{ExportRequest, ExportSettings};

/// Handle to a scheduled export task.
///
/// Holds the task's cancellation token and the join handles for the task
/// itself and its event relay.
struct TaskHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
    relay: JoinHandle<()>,
}

impl TaskHandle {
    /// Request the task stop at its next safe point.
    ///
    /// Safe to call repeatedly and after the task has finished.
    fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Coordinator owning the currently active export task.
pub struct ExportCoordinator {
    settings: ExportSettings,
    events_tx: UnboundedSender<ExportEvent>,
    current: Option<TaskHandle>,
}

impl ExportCoordinator {
    /// Create a coordinator and the outward event stream its caller
    /// consumes.
    pub fn new(settings: ExportSettings) -> (Self, UnboundedReceiver<ExportEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (
            Self {
                settings,
                events_tx,
                current: None,
            },
            events_rx,
        )
    }

    /// Start a new export, superseding any export in flight.
    ///
    /// The previous task (if any) is asked to stop before the new one is
    /// scheduled; it may still be unwinding asynchronously when this
    /// call returns. Row/header shape is not validated here — mismatches
    /// surface as events from within the task.
    ///
    /// Returns immediately after scheduling.
    pub fn start_export(&mut self, request: ExportRequest) {
        if let Some(previous) = self.current.take() {
            debug!("superseding active export task");
            previous.stop();
        }

        let cancel = CancellationToken::new();
        let (task_tx, mut task_rx) = mpsc::unbounded_channel();
        let task = ExportTask::new(request, self.settings.clone(), cancel.clone(), task_tx);

        let outward = self.events_tx.clone();
        let relay = tokio::spawn(async move {
            while let Some(event) = task_rx.recv().await {
                let _ = outward.send(event);
            }
        });
        let join = tokio::task::spawn_blocking(move || task.run());

        self.current = Some(TaskHandle {
            cancel,
            task: join,
            relay,
        });
    }

    /// Ask the current task, if any, to stop at its next safe point.
    pub fn stop(&mut self) {
        if let Some(current) = &self.current {
            current.stop();
        }
    }

    /// Wait for the current task and its event relay to finish.
    ///
    /// After this returns, every event the task emitted has been
    /// forwarded to the outward channel. No-op when no task is active.
    pub async fn join_current(&mut self) {
        if let Some(handle) = self.current.take() {
            let _ = handle.task.await;
            let _ = handle.relay.await;
        }
    }
}
