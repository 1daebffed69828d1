//! reqwest-backed upstream client with per-call deadlines.
//!
//! # Responsibilities
//! - Append endpoint paths to the configured base URL
//! - Issue GET / POST / DELETE with a per-request deadline
//! - Classify non-success statuses and parse JSON bodies
//! - Record upstream latency and status in metrics

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::observability::metrics;
use crate::upstream::error::{TransportError, TransportResult};
use crate::upstream::{EmployeeInput, Upstream};

/// HTTP conduit to the upstream directory.
///
/// Cloning is cheap: the inner `reqwest::Client` shares one connection pool.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: String,
    timeout_duration: Duration,
}

impl HttpUpstream {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - absolute URL prefix; endpoints are appended verbatim
    /// * `connect_timeout` - TCP/TLS connection establishment limit
    /// * `request_timeout` - deadline for one full round-trip
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().connect_timeout(connect_timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout_duration: request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a request and return the status and body of a success response.
    async fn execute(
        &self,
        method: &'static str,
        request: RequestBuilder,
    ) -> TransportResult<(StatusCode, String)> {
        let start_time = Instant::now();

        let round_trip = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        let (status, body) = match timeout(self.timeout_duration, round_trip).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "Upstream request failed");
                metrics::record_upstream_call(method, None, start_time);
                return Err(TransportError::unreachable(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(method, timeout = ?self.timeout_duration, "Upstream request timed out");
                metrics::record_upstream_call(method, None, start_time);
                return Err(TransportError::unreachable(format!(
                    "upstream did not respond within {:?}",
                    self.timeout_duration
                )));
            }
        };

        metrics::record_upstream_call(method, Some(status), start_time);

        if !status.is_success() {
            tracing::warn!(method, status = %status, "Upstream returned error status");
            return Err(TransportError::from_status(status, body));
        }

        Ok((status, body))
    }
}

/// Parse a success body as an opaque JSON document. An empty body is `null`.
fn parse_document(status: StatusCode, body: &str) -> TransportResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| {
        TransportError::malformed(Some(status), format!("upstream body is not JSON: {}", e))
    })
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn get(&self, endpoint: &str) -> TransportResult<Value> {
        let url = self.url(endpoint);
        tracing::info!(url = %url, "GET upstream call");
        let (status, body) = self.execute("GET", self.client.get(&url)).await?;
        parse_document(status, &body)
    }

    async fn post(&self, endpoint: &str, body: &EmployeeInput) -> TransportResult<Value> {
        let url = self.url(endpoint);
        tracing::info!(url = %url, "POST upstream call");
        let (status, body) = self.execute("POST", self.client.post(&url).json(body)).await?;
        parse_document(status, &body)
    }

    async fn delete(&self, endpoint: &str) -> TransportResult<()> {
        let url = self.url(endpoint);
        tracing::info!(url = %url, "DELETE upstream call");
        self.execute("DELETE", self.client.delete(&url)).await?;
        Ok(())
    }
}
