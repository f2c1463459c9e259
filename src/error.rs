use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Operation errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong in a Load, Predict or Plot operation.
///
/// Errors are caught at the operation boundary and shown to the user as a
/// dialog plus a log line. The type is `Clone` so it can travel from a worker
/// thread to the UI thread inside a [`crate::worker::WorkerMessage`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("The CSV file is empty.")]
    EmptyData,

    /// Any other read or parse failure while loading. Carries the full
    /// context chain of the underlying error.
    #[error("{0}")]
    Load(String),

    #[error("Column '{0}' not found in data.")]
    MissingColumn(String),

    #[error("{0}")]
    Plot(String),

    /// The worker thread could not be started or stopped before delivering
    /// its result.
    #[error("worker failed: {0}")]
    Worker(String),
}

impl From<anyhow::Error> for ViewerError {
    fn from(e: anyhow::Error) -> Self {
        ViewerError::Load(format!("{e:#}"))
    }
}
