//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories over SeaORM entities

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    EmployeeRepository, EmployeeStore, NodeRepository, NodeStore, ProductRepository, ProductStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockEmployeeRepository, MockNodeRepository, MockProductRepository};
