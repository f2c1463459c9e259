//! Background workers for the Load, Refresh and Predict commands.
//!
//! Each accepted command runs on its own named thread. Workers never see UI
//! state: they get owned inputs, and they report back by sending
//! [`WorkerMessage`]s over a channel that the UI thread drains once per
//! frame.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use eframe::egui;

use crate::data::loader;
use crate::data::model::Dataset;
use crate::data::predict::{self, PredictionOutcome};
use crate::error::ViewerError;

/// The three user commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Refresh,
    Predict,
}

impl Operation {
    fn thread_name(self) -> &'static str {
        match self {
            Operation::Load => "viewer-load",
            Operation::Refresh => "viewer-refresh",
            Operation::Predict => "viewer-predict",
        }
    }
}

/// Messages sent from a worker thread to the UI thread.
#[derive(Debug)]
pub enum WorkerMessage {
    /// A line for the log pane.
    Log(String),
    /// Load or Refresh finished.
    DatasetLoaded {
        op: Operation,
        result: Result<Dataset, ViewerError>,
    },
    /// Predict finished.
    PredictionReady(Result<PredictionOutcome, ViewerError>),
    /// The worker stopped without delivering its result.
    Aborted(Operation),
}

// ---------------------------------------------------------------------------
// Completion guard
// ---------------------------------------------------------------------------

/// Sends [`WorkerMessage::Aborted`] on drop unless the worker delivered its
/// result, so the UI always gets its controls back.
struct CompletionGuard {
    op: Operation,
    tx: Sender<WorkerMessage>,
    ctx: Option<egui::Context>,
    delivered: bool,
}

impl CompletionGuard {
    fn send(&self, msg: WorkerMessage) {
        // The receiver lives as long as the application; a failed send only
        // happens during shutdown.
        let _ = self.tx.send(msg);
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }

    fn finish(mut self, msg: WorkerMessage) {
        self.send(msg);
        self.delivered = true;
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.delivered {
            log::error!("{:?} worker stopped before delivering a result", self.op);
            self.send(WorkerMessage::Aborted(self.op));
        }
    }
}

// ---------------------------------------------------------------------------
// Task runner
// ---------------------------------------------------------------------------

/// Owns the worker → UI channel and spawns one thread per command.
pub struct TaskRunner {
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
    /// Woken after every message so the UI drains promptly.
    ctx: Option<egui::Context>,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRunner {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx, ctx: None }
    }

    /// Repaint this context whenever a worker posts a message.
    pub fn attach_context(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
    }

    /// Read `path` into a [`Dataset`] on a worker thread.
    pub fn spawn_load(&self, op: Operation, path: PathBuf) -> Result<(), ViewerError> {
        self.spawn(op, move |guard| {
            guard.send(WorkerMessage::Log(format!(
                "Loading data from: {}",
                path.display()
            )));
            let result = loader::load_csv(&path);
            guard.finish(WorkerMessage::DatasetLoaded { op, result });
        })
    }

    /// Run the calibration check against an owned copy of the dataset.
    pub fn spawn_predict(&self, dataset: Dataset, threshold: f64) -> Result<(), ViewerError> {
        self.spawn(Operation::Predict, move |guard| {
            let result = predict::predict(&dataset, threshold);
            if let Ok(outcome) = &result {
                let mean = outcome.mean.unwrap_or(f64::NAN);
                guard.send(WorkerMessage::Log(format!(
                    "Average {}: {mean:.2}",
                    predict::SENSOR_COLUMN
                )));
            }
            guard.finish(WorkerMessage::PredictionReady(result));
        })
    }

    /// Next pending message, if any. Never blocks.
    pub fn try_recv(&self) -> Option<WorkerMessage> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) => None,
            // We hold a sender ourselves, so the channel cannot disconnect.
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// A sender into the UI channel, for feeding messages directly.
    #[cfg(test)]
    pub(crate) fn sender(&self) -> Sender<WorkerMessage> {
        self.tx.clone()
    }

    fn spawn<F>(&self, op: Operation, work: F) -> Result<(), ViewerError>
    where
        F: FnOnce(CompletionGuard) + Send + 'static,
    {
        let guard = CompletionGuard {
            op,
            tx: self.tx.clone(),
            ctx: self.ctx.clone(),
            delivered: false,
        };
        thread::Builder::new()
            .name(op.thread_name().into())
            .spawn(move || work(guard))
            .map(|_| ())
            .map_err(|e| ViewerError::Worker(format!("could not start {op:?} worker: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn recv_all(runner: &TaskRunner, until_final: usize) -> Vec<WorkerMessage> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut out = Vec::new();
        let mut finals = 0;
        while finals < until_final {
            assert!(Instant::now() < deadline, "worker did not finish in time");
            match runner.try_recv() {
                Some(msg) => {
                    if !matches!(msg, WorkerMessage::Log(_)) {
                        finals += 1;
                    }
                    out.push(msg);
                }
                None => thread::sleep(Duration::from_millis(5)),
            }
        }
        out
    }

    #[test]
    fn test_load_worker_logs_then_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let runner = TaskRunner::new();
        runner.spawn_load(Operation::Load, path.clone()).unwrap();

        let msgs = recv_all(&runner, 1);
        assert!(matches!(&msgs[0], WorkerMessage::Log(l) if l.starts_with("Loading data from:")));
        match &msgs[1] {
            WorkerMessage::DatasetLoaded { op, result } => {
                assert_eq!(*op, Operation::Load);
                assert_eq!(result, &Err(ViewerError::FileNotFound(path)));
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_panicking_worker_reports_aborted() {
        let runner = TaskRunner::new();
        runner
            .spawn(Operation::Predict, |_guard| panic!("boom"))
            .unwrap();
        let msgs = recv_all(&runner, 1);
        assert!(matches!(msgs[0], WorkerMessage::Aborted(Operation::Predict)));
    }
}
