/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export subsystem errors so callers only need one import path
pub use crate::memory::MemoryError;
pub use crate::process::ProcessError;

/// Simulator result type
pub type SimResult<T> = Result<T, SimError>;

/// Unified simulator error type with miette diagnostics
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SimError {
    #[error("Process error: {0}")]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error("Memory error: {0}")]
    #[diagnostic(transparent)]
    Memory(#[from] MemoryError),

    #[error("Invalid input: {0}")]
    #[diagnostic(
        code(sim::invalid_input),
        help("Enter a whole number within the range shown in the prompt.")
    )]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(sim::configuration_error),
        help("Review the SCHED_SIM_* environment variables.")
    )]
    Config(String),

    #[error("Scheduler worker failed: {0}")]
    #[diagnostic(
        code(sim::worker_failed),
        help("The background scheduler task panicked or was cancelled. Check the logs.")
    )]
    Worker(String),
}

impl SimError {
    /// Whether the error came from bad user input rather than simulator state
    pub fn is_input_error(&self) -> bool {
        matches!(self, SimError::InvalidInput(_))
    }
}

impl From<tokio::task::JoinError> for SimError {
    fn from(err: tokio::task::JoinError) -> Self {
        SimError::Worker(err.to_string())
    }
}
