//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::ErrorCode;
use shared::models::{
    Employee, EmployeeCreate, EmployeeDeleted, EmployeeFilter, EmployeeQuery, EmployeeSaved,
    EmployeeStatusUpdate, EmployeeUpdate, EmployeeUpdated, Position, StatsSummary,
};

use crate::api::convert::employees_to_api;
use crate::api::extract::{JsonBody, ValidatedJson};
use crate::core::ServerState;
use crate::db::repository::EmployeeRepository;
use crate::utils::{AppError, AppResult};

/// List employees, optional `?status=&position=&shift=`
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<EmployeeQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let filter = EmployeeFilter::try_from(query).map_err(|e| AppError::validation(e.to_string()))?;
    let repo = EmployeeRepository::new(state.get_db());
    let employees = repo.find_all(&filter).await?;
    Ok(Json(employees_to_api(employees)?))
}

/// List employees of one position (`GET /employees/{positionType}`)
pub async fn list_by_position(
    State(state): State<ServerState>,
    Path(position_type): Path<String>,
) -> AppResult<Json<Vec<Employee>>> {
    let position: Position = position_type
        .parse()
        .map_err(|_| AppError::validation("Invalid position type"))?;

    let repo = EmployeeRepository::new(state.get_db());
    let employees = repo.find_all(&EmployeeFilter::by_position(position)).await?;
    Ok(Json(employees_to_api(employees)?))
}

/// Active-employee statistics
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<StatsSummary>> {
    let repo = EmployeeRepository::new(state.get_db());
    Ok(Json(repo.stats().await?))
}

/// Create a new employee
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<EmployeeSaved>)> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee: Employee = repo.create(payload).await?.try_into()?;

    tracing::info!(
        id = %employee.id,
        employee_id = ?employee.employee_id,
        "Employee data saved"
    );

    Ok((StatusCode::CREATED, Json(EmployeeSaved { employee })))
}

/// Update the supplied fields of an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<EmployeeUpdate>,
) -> AppResult<Json<EmployeeUpdated>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee: Employee = repo.update(&id, payload).await?.try_into()?;

    tracing::info!(id = %id, "Employee data updated");

    Ok(Json(EmployeeUpdated { employee }))
}

/// Update only the status, returns the bare record
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<EmployeeStatusUpdate>,
) -> AppResult<Json<Employee>> {
    let status = payload.status.ok_or_else(|| {
        AppError::with_message(ErrorCode::RequiredField, "status is required")
            .with_detail("field", "status")
    })?;

    let repo = EmployeeRepository::new(state.get_db());
    let employee: Employee = repo.update_status(&id, status).await?.try_into()?;

    tracing::info!(id = %id, status = %status, "Employee status updated");

    Ok(Json(employee))
}

/// Hard delete an employee, echoes the deleted record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeDeleted>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee: Employee = repo.delete(&id).await?.try_into()?;

    tracing::info!(id = %id, "Employee data deleted");

    Ok(Json(EmployeeDeleted { employee }))
}
