//! Employee record, upstream envelope, and coercion rules.
//!
//! The upstream is loosely typed: ids arrive as integers or strings, salaries
//! sometimes as numeric strings, and `data` changes shape per endpoint. This
//! module turns those documents into canonical [`Employee`] values or a
//! [`CoercionError`] naming the offending field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Canonical employee record returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Serialized as a string regardless of the upstream's integer width.
    pub id: String,
    pub employee_name: String,
    pub employee_salary: u64,
    pub employee_age: u64,
    #[serde(default)]
    pub profile_image: String,
}

/// Why a JSON object could not become an [`Employee`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("field '{0}' is missing")]
    Missing(&'static str),

    #[error("field '{field}' has unusable value {value}")]
    Invalid { field: &'static str, value: String },
}

impl Employee {
    /// Coerce one upstream employee object.
    pub fn from_upstream(record: &Map<String, Value>) -> Result<Self, CoercionError> {
        let id = coerce_id(record.get("id"))?;
        let employee_name = coerce_name(record.get("employee_name"))?;
        let employee_salary = coerce_number("employee_salary", record.get("employee_salary"))?
            .ok_or(CoercionError::Missing("employee_salary"))?;
        let employee_age = coerce_number("employee_age", record.get("employee_age"))?.unwrap_or(0);
        let profile_image = match record.get("profile_image") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        Ok(Self {
            id,
            employee_name,
            employee_salary,
            employee_age,
            profile_image,
        })
    }
}

fn coerce_id(value: Option<&Value>) -> Result<String, CoercionError> {
    match value {
        None | Some(Value::Null) => Err(CoercionError::Missing("id")),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(other) => Err(CoercionError::Invalid {
            field: "id",
            value: other.to_string(),
        }),
    }
}

fn coerce_name(value: Option<&Value>) -> Result<String, CoercionError> {
    match value {
        None | Some(Value::Null) => Err(CoercionError::Missing("employee_name")),
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(other) => Err(CoercionError::Invalid {
            field: "employee_name",
            value: other.to_string(),
        }),
    }
}

/// Accept a non-negative JSON integer or a string holding one.
/// Returns `Ok(None)` when the field is absent or null.
fn coerce_number(field: &'static str, value: Option<&Value>) -> Result<Option<u64>, CoercionError> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(n) => Ok(Some(n)),
        None => Err(CoercionError::Invalid {
            field,
            value: value.map(Value::to_string).unwrap_or_default(),
        }),
    }
}

/// Shape of the upstream's `data` field.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeData {
    /// List endpoint: an array of employee objects.
    List(Vec<Value>),
    /// By-id and create endpoints: one employee object.
    Record(Map<String, Value>),
    /// `data` missing or null.
    Absent,
}

/// The `{status, data, message}` wrapper the upstream returns.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamEnvelope {
    /// Advisory only; HTTP status decides success.
    pub status: Option<String>,
    pub data: EnvelopeData,
    pub message: Option<String>,
}

/// The document did not have the envelope shape an endpoint requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ShapeError(pub String);

impl UpstreamEnvelope {
    /// Interpret a parsed upstream document.
    pub fn from_document(document: Value) -> Result<Self, ShapeError> {
        let mut fields = match document {
            Value::Object(fields) => fields,
            other => {
                return Err(ShapeError(format!(
                    "expected an envelope object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let data = match fields.remove("data") {
            None | Some(Value::Null) => EnvelopeData::Absent,
            Some(Value::Array(items)) => EnvelopeData::List(items),
            Some(Value::Object(record)) => EnvelopeData::Record(record),
            Some(other) => {
                return Err(ShapeError(format!(
                    "expected 'data' to be an array or object, got {}",
                    json_kind(&other)
                )))
            }
        };

        Ok(Self {
            status: optional_string(fields.remove("status")),
            data,
            message: optional_string(fields.remove("message")),
        })
    }
}

fn optional_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
