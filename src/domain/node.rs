//! Network node domain entity and related types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Product, ProductResponse};

/// Node tier derived from the supplier chain.
///
/// Never accepted from clients; recomputed on every save from the
/// immediate supplier's current tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Factory,
    Retail,
    Entrepreneur,
}

impl From<i16> for Tier {
    fn from(value: i16) -> Self {
        match value {
            1 => Tier::Retail,
            2 => Tier::Entrepreneur,
            _ => Tier::Factory,
        }
    }
}

impl From<Tier> for i16 {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Factory => 0,
            Tier::Retail => 1,
            Tier::Entrepreneur => 2,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Factory => write!(f, "factory"),
            Tier::Retail => write!(f, "retail"),
            Tier::Entrepreneur => write!(f, "entrepreneur"),
        }
    }
}

/// Network node domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub tier: Tier,
    pub debt: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

/// Data for inserting a new node; tier and debt have already passed
/// through the hierarchy deriver and the financial mutation guard.
#[derive(Debug, Clone)]
pub struct NewNode {
    pub name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub supplier_id: Option<i64>,
    pub tier: Tier,
    pub debt: Decimal,
    pub is_active: bool,
    pub product_ids: Vec<i64>,
}

/// Data for a full node update; debt is structurally absent — the only
/// post-creation mutator is the bulk clear-debt action.
#[derive(Debug, Clone)]
pub struct NodeUpdate {
    pub name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub supplier_id: Option<i64>,
    pub tier: Tier,
    pub is_active: bool,
    /// `None` leaves the product associations unchanged.
    pub product_ids: Option<Vec<i64>>,
}

/// Node creation data (validated transport payload, pre-derivation)
#[derive(Debug, Clone)]
pub struct CreateNode {
    pub name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub supplier_id: Option<i64>,
    pub debt: Option<Decimal>,
    pub is_active: bool,
    pub product_ids: Vec<i64>,
}

/// Node update data (validated transport payload, pre-derivation)
#[derive(Debug, Clone)]
pub struct UpdateNode {
    pub name: String,
    pub email: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    pub supplier_id: Option<i64>,
    pub is_active: bool,
    pub product_ids: Option<Vec<i64>>,
}

/// Filter parameters for node list queries.
///
/// Pure passthrough to storage; no invariants live here.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct NodeFilter {
    /// Country name, case-insensitive exact match
    pub country: Option<String>,
    /// City name, case-insensitive exact match
    pub city: Option<String>,
    /// Lower debt bound (inclusive)
    pub min_debt: Option<Decimal>,
    /// Upper debt bound (inclusive)
    pub max_debt: Option<Decimal>,
    /// Tier filter
    pub tier: Option<Tier>,
    /// Activity flag filter
    pub is_active: Option<bool>,
    /// Substring search over name, email, city and country
    pub search: Option<String>,
    /// Sort key: `created_at`, `name` or `debt`, prefix `-` for descending
    pub ordering: Option<String>,
}

/// Node response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NodeResponse {
    /// Unique node identifier
    pub id: i64,
    /// Unique node name
    #[schema(example = "Voltline Components")]
    pub name: String,
    /// Contact email address
    #[schema(example = "sales@voltline.example")]
    pub email: String,
    pub country: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    /// Supplier node id, absent for top-of-chain factories
    pub supplier: Option<i64>,
    /// Supplier node name, resolved for display
    pub supplier_name: Option<String>,
    /// Derived tier
    pub tier: Tier,
    /// Products carried by this node
    pub products: Vec<ProductResponse>,
    /// Outstanding liability towards the supplier
    #[schema(value_type = String, example = "1499.99")]
    pub debt: Decimal,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl From<Node> for NodeResponse {
    fn from(node: Node) -> Self {
        Self {
            id: node.id,
            name: node.name,
            email: node.email,
            country: node.country,
            city: node.city,
            street: node.street,
            house_number: node.house_number,
            supplier: node.supplier_id,
            supplier_name: node.supplier_name,
            tier: node.tier,
            products: node.products.into_iter().map(ProductResponse::from).collect(),
            debt: node.debt,
            created_at: node.created_at,
            is_active: node.is_active,
        }
    }
}
