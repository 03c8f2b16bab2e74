//! Service container - centralized service construction.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, EmployeeManager, EmployeeService, NodeManager, NodeService,
    ProductManager, ProductService,
};
use crate::config::Config;
use crate::infra::{EmployeeStore, NodeStore, ProductStore};

/// Concrete service container holding one instance of every service.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    node_service: Arc<dyn NodeService>,
    product_service: Arc<dyn ProductService>,
    employee_service: Arc<dyn EmployeeService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let node_repo = Arc::new(NodeStore::new(db.clone()));
        let product_repo = Arc::new(ProductStore::new(db.clone()));
        let employee_repo = Arc::new(EmployeeStore::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(config)),
            node_service: Arc::new(NodeManager::new(node_repo)),
            product_service: Arc::new(ProductManager::new(product_repo)),
            employee_service: Arc::new(EmployeeManager::new(employee_repo)),
        }
    }

    /// Get token verification service
    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    /// Get node service
    pub fn nodes(&self) -> Arc<dyn NodeService> {
        self.node_service.clone()
    }

    /// Get product service
    pub fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    /// Get employee service
    pub fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }
}
