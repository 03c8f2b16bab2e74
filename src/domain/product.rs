//! Product domain entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Product domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub release_date: NaiveDate,
}

/// Data for inserting a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub model: String,
    pub release_date: NaiveDate,
}

/// Filter parameters for product list queries
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductFilter {
    /// Substring search over name and model
    pub search: Option<String>,
    /// Sort key: `release_date` or `name`, prefix `-` for descending
    pub ordering: Option<String>,
}

/// Product response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    /// Unique product identifier
    pub id: i64,
    /// Product name
    #[schema(example = "Smartphone X12")]
    pub name: String,
    /// Model designation
    #[schema(example = "X12-256GB")]
    pub model: String,
    /// Market release date
    pub release_date: NaiveDate,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            model: product.model,
            release_date: product.release_date,
        }
    }
}
