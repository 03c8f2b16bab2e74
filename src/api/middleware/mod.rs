//! API middleware.

mod auth;

pub use auth::{auth_middleware, employee_gate_middleware, require_admin, CurrentUser};
