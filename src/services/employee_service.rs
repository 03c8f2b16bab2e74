//! Employee service - the access gate.
//!
//! A capability layer on top of upstream authentication: the caller is
//! already a verified principal, this service only answers "is this an
//! active employee", provisioning the employee record on first contact.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::Employee;
use crate::errors::{AppError, AppResult};
use crate::infra::EmployeeRepository;

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// Grant or deny API access for an authenticated principal.
    ///
    /// Unknown principals are provisioned as active employees on first
    /// sight (self-service onboarding); known inactive employees are
    /// denied.
    async fn authorize(&self, principal: Uuid, email: &str) -> AppResult<()>;

    /// List all employees (administration surface)
    async fn list_employees(&self) -> AppResult<Vec<Employee>>;

    /// Get employee by ID
    async fn get_employee(&self, id: i64) -> AppResult<Employee>;

    /// Toggle the activity flag
    async fn set_active(&self, id: i64, is_active: bool) -> AppResult<Employee>;
}

/// Concrete implementation of EmployeeService.
pub struct EmployeeManager<R: EmployeeRepository> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository> EmployeeManager<R> {
    /// Create new employee service instance
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: EmployeeRepository> EmployeeService for EmployeeManager<R> {
    async fn authorize(&self, principal: Uuid, email: &str) -> AppResult<()> {
        let employee = self.repo.get_or_create(principal, email).await?;

        if employee.is_active {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }

    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.repo.list().await
    }

    async fn get_employee(&self, id: i64) -> AppResult<Employee> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn set_active(&self, id: i64, is_active: bool) -> AppResult<Employee> {
        let employee = self.repo.set_active(id, is_active).await?;
        tracing::info!(
            employee_id = employee.id,
            is_active,
            "employee activity flag changed"
        );
        Ok(employee)
    }
}
