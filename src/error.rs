//! Error types for the run orchestrator

use thiserror::Error;

/// Errors surfaced to whoever asked for a run
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Another run-all or deep-run sequence is still active
    #[error("A benchmark sequence is already running")]
    Busy,

    /// No operation registered under this id
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// One side of the operation failed
    #[error("Operation {id} failed: {source}")]
    Operation {
        id: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Result type for orchestrator calls
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
