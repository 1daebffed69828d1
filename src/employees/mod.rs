//! Employee aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream JSON document
//!     → model.rs (UpstreamEnvelope: List | Record | Absent)
//!     → model.rs (coercion into Employee, or skip/fail)
//!     → aggregate.rs (search, highest salary, top earners)
//!     → service.rs (EmployeeService operations)
//! ```

pub mod aggregate;
pub mod error;
pub mod model;
pub mod service;

pub use error::{EmployeeError, EmployeeResult};
pub use model::{Employee, EnvelopeData, UpstreamEnvelope};
pub use service::EmployeeService;
