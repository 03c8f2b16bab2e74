//! Employee repository implementation.
//!
//! The only non-obvious operation is `get_or_create`: lazy provisioning
//! must stay idempotent under concurrent first-time requests from the
//! same principal, so the insert goes through the storage layer's
//! conflict handling instead of a check-then-create sequence.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::employee;
use crate::domain::Employee;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Employee repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find employee by bound principal
    async fn find_by_principal(&self, principal: Uuid) -> AppResult<Option<Employee>>;

    /// Find employee by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Employee>>;

    /// Fetch the employee bound to a principal, provisioning an active
    /// record if none exists yet. At most one row per principal even
    /// when first-time requests race.
    async fn get_or_create(&self, principal: Uuid, email: &str) -> AppResult<Employee>;

    /// List all employees
    async fn list(&self) -> AppResult<Vec<Employee>>;

    /// Toggle the activity flag
    async fn set_active(&self, id: i64, is_active: bool) -> AppResult<Employee>;
}

/// Concrete implementation of EmployeeRepository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_by_principal(&self, principal: Uuid) -> AppResult<Option<Employee>> {
        let model = employee::Entity::find()
            .filter(employee::Column::Principal.eq(principal))
            .one(&self.db)
            .await?;

        Ok(model.map(Employee::from))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Employee>> {
        let model = employee::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Employee::from))
    }

    async fn get_or_create(&self, principal: Uuid, email: &str) -> AppResult<Employee> {
        if let Some(existing) = self.find_by_principal(principal).await? {
            return Ok(existing);
        }

        let active = employee::ActiveModel {
            principal: Set(principal),
            email: Set(email.to_string()),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        // Insert-if-absent: a racing first request hits the unique
        // constraint, inserts nothing and reads the winner's row back.
        employee::Entity::insert(active)
            .on_conflict(
                OnConflict::column(employee::Column::Principal)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        self.find_by_principal(principal)
            .await?
            .ok_or_else(|| AppError::internal("employee missing after upsert"))
    }

    async fn list(&self) -> AppResult<Vec<Employee>> {
        let models = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn set_active(&self, id: i64, is_active: bool) -> AppResult<Employee> {
        let model = employee::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: employee::ActiveModel = model.into();
        active.is_active = Set(is_active);

        let model = active.update(&self.db).await?;
        Ok(Employee::from(model))
    }
}
