//! Electronics Trade Network API
//!
//! A hierarchical supply network of electronics distributors exposed
//! through an access-controlled REST API. The heart of the crate is the
//! supply-hierarchy integrity engine in [`domain`]: tier derivation
//! from the supplier chain, cycle rejection, and the financial mutation
//! guard on the debt field. Everything else is transport plumbing that
//! must call that engine before persisting.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and the integrity engine
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, repositories)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Node, Tier};
pub use errors::{AppError, AppResult};
