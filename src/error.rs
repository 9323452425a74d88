//! Error types for the task board.
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad arguments, unknown project or task, failed validation)
//! - 4: Operation failed (storage read/write, serialization)

use thiserror::Error;

/// Exit codes for the `pb` CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for board operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Multiple tasks match '{query}':\n{candidates}Please use the task ID instead.")]
    AmbiguousTask { query: String, candidates: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_)
            | Error::ProjectNotFound(_)
            | Error::TaskNotFound(_)
            | Error::AmbiguousTask { .. }
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            Error::Io(_) | Error::Json(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for board operations
pub type Result<T> = std::result::Result<T, Error>;
