//! Route handlers for the employee API.
//!
//! Handlers only validate inputs, call [`EmployeeService`], and serialize
//! the result. Failures become an `ErrorResponse` via `EmployeeError`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::employees::{Employee, EmployeeError, EmployeeResult};
use crate::http::error::ErrorResponse;
use crate::http::server::AppState;

fn require_id(id: &str) -> EmployeeResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(EmployeeError::InvalidInput("employee id must not be blank".to_string()));
    }
    Ok(id)
}

pub async fn get_all_employees(State(state): State<AppState>) -> EmployeeResult<Json<Vec<Employee>>> {
    Ok(Json(state.service.list_all().await?))
}

pub async fn search_employees(
    State(state): State<AppState>,
    Path(search_string): Path<String>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    Ok(Json(state.service.search_by_name(&search_string).await?))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> EmployeeResult<Json<Employee>> {
    let id = require_id(&id)?;
    Ok(Json(state.service.get_by_id(id).await?))
}

pub async fn get_highest_salary(State(state): State<AppState>) -> EmployeeResult<Json<u64>> {
    Ok(Json(state.service.highest_salary().await?))
}

pub async fn get_top_ten_earner_names(
    State(state): State<AppState>,
) -> EmployeeResult<Json<Vec<String>>> {
    Ok(Json(state.service.top_ten_earner_names().await?))
}

pub async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> EmployeeResult<Json<Employee>> {
    let Json(body) = body.map_err(|e| EmployeeError::InvalidInput(e.body_text()))?;
    let Value::Object(input) = body else {
        return Err(EmployeeError::InvalidInput(
            "request body must be a JSON object".to_string(),
        ));
    };
    Ok(Json(state.service.create(&input).await?))
}

/// Responds with the deleted employee's name as a bare string.
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> EmployeeResult<String> {
    let id = require_id(&id)?;
    state.service.delete_by_id(id).await
}

/// Unknown routes answer with the same error body as everything else.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Not Found", "No matching route found")),
    )
        .into_response()
}
