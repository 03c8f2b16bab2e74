//! Employee domain entity - the access-control principal binding.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Employee domain entity.
///
/// One-to-one with an external identity principal. Provisioned lazily
/// the first time a principal is seen; never auto-deleted, only toggled
/// inactive.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: i64,
    pub principal: Uuid,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Employee response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeResponse {
    /// Unique employee identifier
    pub id: i64,
    /// Bound identity-provider principal
    pub principal: Uuid,
    /// Email copied from the principal's token
    #[schema(example = "employee@example.com")]
    pub email: String,
    /// Whether the employee may call the API
    pub is_active: bool,
    /// Provisioning timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            principal: employee.principal,
            email: employee.email,
            is_active: employee.is_active,
            created_at: employee.created_at,
        }
    }
}
