//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns, plus the
//! two pure engine modules every mutation path must go through:
//! [`hierarchy`] (tier derivation and cycle rejection) and [`debt`]
//! (the financial mutation guard).

pub mod debt;
pub mod employee;
pub mod hierarchy;
pub mod node;
pub mod product;

pub use employee::{Employee, EmployeeResponse};
pub use hierarchy::{derive_and_validate, derive_tier, SupplierLink};
pub use node::{
    CreateNode, NewNode, Node, NodeFilter, NodeResponse, NodeUpdate, Tier, UpdateNode,
};
pub use product::{NewProduct, Product, ProductFilter, ProductResponse};
