//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and
//! infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{AuthService, EmployeeService, NodeService, ProductService, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Token verification service
    pub auth_service: Arc<dyn AuthService>,
    /// Node service
    pub node_service: Arc<dyn NodeService>,
    /// Product service
    pub product_service: Arc<dyn ProductService>,
    /// Employee service (access gate)
    pub employee_service: Arc<dyn EmployeeService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: services.auth(),
            node_service: services.nodes(),
            product_service: services.products(),
            employee_service: services.employees(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    ///
    /// Used by tests to wire mock services against a mock database.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        node_service: Arc<dyn NodeService>,
        product_service: Arc<dyn ProductService>,
        employee_service: Arc<dyn EmployeeService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            node_service,
            product_service,
            employee_service,
            database,
        }
    }
}
