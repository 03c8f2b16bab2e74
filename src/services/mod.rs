//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod employee_service;
mod node_service;
mod product_service;

pub use auth_service::{AuthService, Authenticator, Claims};
pub use container::Services;
pub use employee_service::{EmployeeManager, EmployeeService};
pub use node_service::{NodeManager, NodeService};
pub use product_service::{ProductManager, ProductService};
