//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod employee_repository;
pub(crate) mod entities;
mod node_repository;
mod product_repository;

pub use employee_repository::{EmployeeRepository, EmployeeStore};
pub use node_repository::{NodeRepository, NodeStore};
pub use product_repository::{ProductRepository, ProductStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use node_repository::MockNodeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
