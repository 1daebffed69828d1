//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → handlers.rs (validate inputs, call EmployeeService)
//!     → error.rs (EmployeeError → status + ErrorResponse)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ErrorResponse;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
