//! Employee directory façade library.
//!
//! Re-exposes an upstream employee directory through a narrow HTTP API and
//! performs search and ranking over the upstream listing.

pub mod config;
pub mod employees;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::FacadeConfig;
pub use employees::{Employee, EmployeeService};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
