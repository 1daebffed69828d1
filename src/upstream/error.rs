//! Transport error taxonomy for upstream calls.

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Classification of a failed upstream call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Upstream answered 400.
    BadRequest,
    /// Upstream answered 403.
    Forbidden,
    /// Upstream answered 404.
    NotFound,
    /// Any other 4xx.
    OtherClient,
    /// Upstream answered 500.
    InternalServerError,
    /// Upstream answered 503.
    ServiceUnavailable,
    /// Any other 5xx.
    OtherServer,
    /// No response: connect failure, deadline elapsed, cancelled.
    Unreachable,
    /// A response arrived but could not be understood.
    MalformedResponse,
}

impl TransportErrorKind {
    /// Classify an upstream HTTP status that is not a success.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::BadRequest,
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::INTERNAL_SERVER_ERROR => Self::InternalServerError,
            StatusCode::SERVICE_UNAVAILABLE => Self::ServiceUnavailable,
            s if s.is_client_error() => Self::OtherClient,
            s if s.is_server_error() => Self::OtherServer,
            _ => Self::MalformedResponse,
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad request",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::OtherClient => "client error",
            Self::InternalServerError => "internal server error",
            Self::ServiceUnavailable => "service unavailable",
            Self::OtherServer => "server error",
            Self::Unreachable => "unreachable",
            Self::MalformedResponse => "malformed response",
        };
        f.write_str(name)
    }
}

/// A failed upstream call.
///
/// `body` holds the upstream response body when there was one, otherwise a
/// diagnostic string.
#[derive(Debug, Clone, Error)]
#[error("upstream {kind}{}: {body}", status_suffix(.status))]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub status: Option<StatusCode>,
    pub body: String,
}

impl TransportError {
    /// Build from a non-success upstream status and its body.
    pub fn from_status(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::from_status(status),
            status: Some(status),
            body: body.into(),
        }
    }

    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::Unreachable,
            status: None,
            body: detail.into(),
        }
    }

    pub fn malformed(status: Option<StatusCode>, detail: impl Into<String>) -> Self {
        Self {
            kind: TransportErrorKind::MalformedResponse,
            status,
            body: detail.into(),
        }
    }

    /// Reason phrase of the observed status, e.g. "I'm a teapot".
    pub fn status_text(&self) -> Option<&'static str> {
        self.status.and_then(|s| s.canonical_reason())
    }
}

fn status_suffix(status: &Option<StatusCode>) -> String {
    status
        .map(|s| format!(" ({})", s.as_u16()))
        .unwrap_or_default()
}

/// Result type for upstream operations.
pub type TransportResult<T> = Result<T, TransportError>;
