//! Employee administration handlers.
//!
//! Employees are never created here; provisioning happens implicitly in
//! the access gate. This surface only lets administrators inspect and
//! toggle them.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::EmployeeResponse;
use crate::errors::AppResult;

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees))
        .route("/:id", get(get_employee))
        .route("/:id/activate", post(activate_employee))
        .route("/:id/deactivate", post(deactivate_employee))
}

/// List all employees (admin only)
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All employees", body = Vec<EmployeeResponse>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_employees(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EmployeeResponse>>> {
    require_admin(&current_user)?;

    let employees = state.employee_service.list_employees().await?;
    Ok(Json(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

/// Get employee by ID (admin only)
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee detail", body = EmployeeResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    require_admin(&current_user)?;

    let employee = state.employee_service.get_employee(id).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Activate an employee (admin only)
#[utoipa::path(
    post,
    path = "/employees/{id}/activate",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee activated", body = EmployeeResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn activate_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    require_admin(&current_user)?;

    let employee = state.employee_service.set_active(id, true).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}

/// Deactivate an employee (admin only)
#[utoipa::path(
    post,
    path = "/employees/{id}/deactivate",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deactivated", body = EmployeeResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn deactivate_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<EmployeeResponse>> {
    require_admin(&current_user)?;

    let employee = state.employee_service.set_active(id, false).await?;
    Ok(Json(EmployeeResponse::from(employee)))
}
