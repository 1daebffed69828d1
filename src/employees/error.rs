//! Errors raised by employee operations.

use thiserror::Error;

use crate::upstream::TransportError;

/// Errors that can occur while serving an employee operation.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// The upstream call itself failed.
    #[error(transparent)]
    Upstream(#[from] TransportError),

    /// By-id lookup answered without a `data` record.
    #[error("employee '{0}' not found")]
    NotFound(String),

    /// The upstream answered successfully with a body we cannot use.
    #[error("malformed upstream response: {0}")]
    Malformed(String),

    /// Caller input rejected before reaching the upstream.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Anything else.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;
