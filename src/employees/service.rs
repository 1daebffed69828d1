//! Employee domain operations over the upstream directory.
//!
//! # Responsibilities
//! - Call the upstream endpoints and unwrap their envelopes
//! - Coerce envelope records into [`Employee`] values
//! - Run search and ranking aggregations over the full listing
//!
//! # Design Decisions
//! - Every operation re-fetches from the upstream; nothing is cached
//! - List operations skip records that fail coercion; single-record
//!   operations fail with [`EmployeeError::Malformed`] instead
//! - Delete is lookup-then-DELETE and is not atomic: two concurrent deletes
//!   of the same id can both pass the lookup, and the second DELETE then
//!   fails upstream. No locking is attempted here.

use serde_json::Value;
use std::sync::Arc;

use crate::employees::aggregate::{self, TOP_EARNERS_LIMIT};
use crate::employees::error::{EmployeeError, EmployeeResult};
use crate::employees::model::{json_kind, Employee, EnvelopeData, UpstreamEnvelope};
use crate::upstream::{EmployeeInput, Upstream};

/// Upstream endpoint paths, appended to `api.base.url`.
pub mod endpoints {
    pub const EMPLOYEES: &str = "/employees";
    pub const EMPLOYEE: &str = "/employee";
    pub const CREATE: &str = "/create";
    pub const DELETE: &str = "/delete";

    pub fn by_id(id: &str) -> String {
        format!("{}/{}", EMPLOYEE, id)
    }

    pub fn delete(id: &str) -> String {
        format!("{}/{}", DELETE, id)
    }
}

/// Domain operations. Cheap to clone; holds no per-request state.
#[derive(Clone)]
pub struct EmployeeService {
    upstream: Arc<dyn Upstream>,
}

impl EmployeeService {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    /// Every employee in upstream order, skipping records that fail coercion.
    pub async fn list_all(&self) -> EmployeeResult<Vec<Employee>> {
        let envelope = self.fetch(endpoints::EMPLOYEES).await?;
        let items = match envelope.data {
            EnvelopeData::List(items) => items,
            EnvelopeData::Record(_) => {
                return Err(EmployeeError::Malformed(
                    "expected 'data' to be an array, got an object".to_string(),
                ))
            }
            EnvelopeData::Absent => {
                return Err(EmployeeError::Malformed("listing has no 'data' array".to_string()))
            }
        };

        let total = items.len();
        let employees: Vec<Employee> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let Value::Object(record) = item else {
                    tracing::debug!(index, kind = json_kind(item), "Skipping non-object listing entry");
                    return None;
                };
                match Employee::from_upstream(record) {
                    Ok(employee) => Some(employee),
                    Err(e) => {
                        tracing::debug!(index, error = %e, "Skipping employee record");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(total, kept = employees.len(), "Employee listing fetched");
        Ok(employees)
    }

    /// Employees whose name contains `query`, case-insensitively.
    pub async fn search_by_name(&self, query: &str) -> EmployeeResult<Vec<Employee>> {
        let employees = self.list_all().await?;
        Ok(aggregate::search_by_name(employees, query))
    }

    pub async fn get_by_id(&self, id: &str) -> EmployeeResult<Employee> {
        let envelope = self.fetch(&endpoints::by_id(id)).await?;
        match envelope.data {
            EnvelopeData::Record(record) => coerce_record(&record),
            EnvelopeData::Absent => Err(EmployeeError::NotFound(id.to_string())),
            EnvelopeData::List(_) => Err(EmployeeError::Malformed(
                "expected 'data' to be an object, got an array".to_string(),
            )),
        }
    }

    /// Maximum salary across the listing; 0 when the listing is empty.
    pub async fn highest_salary(&self) -> EmployeeResult<u64> {
        let employees = self.list_all().await?;
        Ok(aggregate::highest_salary(&employees))
    }

    /// Names of the ten best paid employees, ties broken by listing order.
    pub async fn top_ten_earner_names(&self) -> EmployeeResult<Vec<String>> {
        let employees = self.list_all().await?;
        Ok(aggregate::top_earner_names(&employees, TOP_EARNERS_LIMIT))
    }

    /// Forward `input` verbatim to the create endpoint.
    pub async fn create(&self, input: &EmployeeInput) -> EmployeeResult<Employee> {
        let document = self.upstream.post(endpoints::CREATE, input).await?;
        let envelope = parse_envelope(document)?;
        match envelope.data {
            EnvelopeData::Record(record) => coerce_record(&record),
            EnvelopeData::List(_) => Err(EmployeeError::Malformed(
                "expected 'data' to be an object, got an array".to_string(),
            )),
            EnvelopeData::Absent => Err(EmployeeError::Malformed(
                "create response has no 'data' record".to_string(),
            )),
        }
    }

    /// Look the employee up, delete it, and return the name it had.
    ///
    /// The DELETE is only issued when the lookup succeeds.
    pub async fn delete_by_id(&self, id: &str) -> EmployeeResult<String> {
        let employee = self.get_by_id(id).await?;
        self.upstream.delete(&endpoints::delete(id)).await?;
        tracing::info!(id = %id, name = %employee.employee_name, "Employee deleted");
        Ok(employee.employee_name)
    }

    async fn fetch(&self, endpoint: &str) -> EmployeeResult<UpstreamEnvelope> {
        let document = self.upstream.get(endpoint).await?;
        parse_envelope(document)
    }
}

fn parse_envelope(document: Value) -> EmployeeResult<UpstreamEnvelope> {
    let envelope =
        UpstreamEnvelope::from_document(document).map_err(|e| EmployeeError::Malformed(e.0))?;
    if let Some(status) = envelope.status.as_deref().filter(|s| *s != "success") {
        tracing::debug!(status, "Upstream envelope reports non-success status");
    }
    Ok(envelope)
}

fn coerce_record(record: &serde_json::Map<String, Value>) -> EmployeeResult<Employee> {
    Employee::from_upstream(record).map_err(|e| EmployeeError::Malformed(e.to_string()))
}
