//! Mapping of employee errors onto caller-facing responses.
//!
//! | Failure | Status | `error` |
//! |---|---|---|
//! | upstream 400 / 403 / 404 | same | "Bad Request" / "Forbidden" / "Not Found" |
//! | other upstream 4xx / 5xx | same | upstream status text |
//! | upstream 500 / 503 | same | "Internal Server Error" / "Service Unavailable" |
//! | no upstream response | 503 | "Service is unavailable" |
//! | unusable upstream body | 500 | "An error occurred while processing your request" |
//! | anything else | 500 | "An unexpected error occurred" |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::employees::EmployeeError;
use crate::upstream::{TransportError, TransportErrorKind};

const PROCESSING_ERROR: &str = "An error occurred while processing your request";
const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Body returned to the caller on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl EmployeeError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(e) => transport_status(e),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Malformed(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the caller-facing body for this error.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            Self::Upstream(e) => ErrorResponse::new(transport_title(e), e.body.clone()),
            Self::NotFound(_) => ErrorResponse::new("Not Found", self.to_string()),
            Self::InvalidInput(detail) => ErrorResponse::new("Bad Request", detail.clone()),
            Self::Malformed(detail) => ErrorResponse::new(PROCESSING_ERROR, detail.clone()),
            Self::Unexpected(detail) => ErrorResponse::new(UNEXPECTED_ERROR, detail.clone()),
        }
    }
}

fn transport_status(err: &TransportError) -> StatusCode {
    match err.kind {
        TransportErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        TransportErrorKind::Forbidden => StatusCode::FORBIDDEN,
        TransportErrorKind::NotFound => StatusCode::NOT_FOUND,
        TransportErrorKind::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        TransportErrorKind::ServiceUnavailable | TransportErrorKind::Unreachable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        TransportErrorKind::OtherClient | TransportErrorKind::OtherServer => {
            err.status.unwrap_or(StatusCode::BAD_GATEWAY)
        }
        TransportErrorKind::MalformedResponse => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn transport_title(err: &TransportError) -> String {
    let title = match err.kind {
        TransportErrorKind::BadRequest => "Bad Request",
        TransportErrorKind::Forbidden => "Forbidden",
        TransportErrorKind::NotFound => "Not Found",
        TransportErrorKind::InternalServerError => "Internal Server Error",
        TransportErrorKind::ServiceUnavailable => "Service Unavailable",
        TransportErrorKind::OtherClient | TransportErrorKind::OtherServer => {
            err.status_text().unwrap_or("Upstream Error")
        }
        TransportErrorKind::Unreachable => "Service is unavailable",
        TransportErrorKind::MalformedResponse => PROCESSING_ERROR,
    };
    title.to_string()
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "Request failed");
        }
        (status, Json(self.to_error_response())).into_response()
    }
}
