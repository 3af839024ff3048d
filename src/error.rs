//! Error types for the store and the application shell.

use std::io;

use thiserror::Error;

use crate::task::TaskId;
use crate::validation::FieldErrors;

/// Failures reported by `TaskStore` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("invalid task: {0}")]
    Invalid(FieldErrors),
    #[error("task {0} not found")]
    NotFound(TaskId),
}

/// Failures from the binary: terminal, logging setup and the replay driver.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),
    #[error("replay line {line}: {source}")]
    Replay {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode replay output: {0}")]
    Encode(#[from] serde_json::Error),
}
