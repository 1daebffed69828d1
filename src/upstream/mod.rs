//! Upstream employee directory access.
//!
//! # Data Flow
//! ```text
//! EmployeeService
//!     → Upstream trait (get / post / delete)
//!     → client.rs (HttpUpstream: base URL + endpoint, deadline, reqwest)
//!     → JSON document | TransportError (error.rs)
//! ```
//!
//! # Design Decisions
//! - No retries, no caching, no envelope interpretation here
//! - HTTP status is authoritative; bodies are opaque JSON
//! - The trait is object safe so the service can hold `Arc<dyn Upstream>`

pub mod client;
pub mod error;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use client::HttpUpstream;
pub use error::{TransportError, TransportErrorKind, TransportResult};

/// Arbitrary string-keyed fields forwarded to the create endpoint.
pub type EmployeeInput = Map<String, Value>;

/// Stateless conduit to the upstream. Must be safe for concurrent use.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// GET `{base}{endpoint}` and return the parsed JSON body.
    async fn get(&self, endpoint: &str) -> TransportResult<Value>;

    /// POST `body` as JSON to `{base}{endpoint}` and return the parsed JSON body.
    async fn post(&self, endpoint: &str, body: &EmployeeInput) -> TransportResult<Value>;

    /// DELETE `{base}{endpoint}`; any response body is discarded.
    async fn delete(&self, endpoint: &str) -> TransportResult<()>;
}
