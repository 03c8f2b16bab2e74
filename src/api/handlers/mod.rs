//! HTTP request handlers.

pub mod employee_handler;
pub mod node_handler;
pub mod product_handler;

pub use employee_handler::employee_routes;
pub use node_handler::node_routes;
pub use product_handler::product_routes;
