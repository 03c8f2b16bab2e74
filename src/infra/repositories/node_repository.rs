//! Network node repository implementation.
//!
//! Write paths expect pre-validated data: the service layer has already
//! run the hierarchy deriver and the financial mutation guard, so the
//! store only persists. Product associations are replaced wholesale
//! inside the same transaction as the node row.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use rust_decimal::Decimal;

use super::entities::{node, node_product, product};
use crate::domain::{NewNode, Node, NodeFilter, NodeUpdate, SupplierLink, Tier};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Node repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NodeRepository: Send + Sync {
    /// Find node by ID with products and supplier name attached
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Node>>;

    /// Check whether a name is already taken by another node
    async fn name_taken(&self, name: &str, exclude_id: Option<i64>) -> AppResult<bool>;

    /// Read the point-in-time supplier snapshot used by hierarchy validation
    async fn supplier_link(&self, id: i64) -> AppResult<Option<SupplierLink>>;

    /// List nodes matching the filter, paginated; returns (page, total)
    async fn list(
        &self,
        filter: &NodeFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Node>, u64)>;

    /// Insert a new node together with its product associations
    async fn create(&self, data: NewNode) -> AppResult<Node>;

    /// Full update of an existing node
    async fn update(&self, id: i64, data: NodeUpdate) -> AppResult<Node>;

    /// Delete node by ID; dependents are detached by the FK, not deleted
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Zero the debt of every listed node in one atomic batch statement
    async fn clear_debt(&self, ids: &[i64]) -> AppResult<u64>;

    /// Count how many of the given product ids exist
    async fn count_products(&self, ids: &[i64]) -> AppResult<u64>;
}

/// Concrete implementation of NodeRepository
pub struct NodeStore {
    db: DatabaseConnection,
}

impl NodeStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach products and supplier names to a page of node models.
    async fn hydrate(&self, models: Vec<node::Model>) -> AppResult<Vec<Node>> {
        let products = models
            .load_many_to_many(product::Entity, node_product::Entity, &self.db)
            .await?;

        let supplier_ids: Vec<i64> = models.iter().filter_map(|m| m.supplier_id).collect();
        let supplier_names: HashMap<i64, String> = if supplier_ids.is_empty() {
            HashMap::new()
        } else {
            node::Entity::find()
                .filter(node::Column::Id.is_in(supplier_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|m| (m.id, m.name))
                .collect()
        };

        Ok(models
            .into_iter()
            .zip(products)
            .map(|(model, products)| {
                let supplier_name = model
                    .supplier_id
                    .and_then(|id| supplier_names.get(&id).cloned());
                Node {
                    id: model.id,
                    name: model.name,
                    email: model.email,
                    country: model.country,
                    city: model.city,
                    street: model.street,
                    house_number: model.house_number,
                    supplier_id: model.supplier_id,
                    supplier_name,
                    tier: Tier::from(model.tier),
                    debt: model.debt,
                    is_active: model.is_active,
                    created_at: model.created_at,
                    products: products.into_iter().map(Into::into).collect(),
                }
            })
            .collect())
    }
}

/// Apply list filters to a node select; passthrough, no invariants.
fn apply_filter(mut query: Select<node::Entity>, filter: &NodeFilter) -> Select<node::Entity> {
    if let Some(country) = &filter.country {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(node::Column::Country)))
                .eq(country.to_lowercase()),
        );
    }
    if let Some(city) = &filter.city {
        query = query
            .filter(Expr::expr(Func::lower(Expr::col(node::Column::City))).eq(city.to_lowercase()));
    }
    if let Some(min_debt) = filter.min_debt {
        query = query.filter(node::Column::Debt.gte(min_debt));
    }
    if let Some(max_debt) = filter.max_debt {
        query = query.filter(node::Column::Debt.lte(max_debt));
    }
    if let Some(tier) = filter.tier {
        query = query.filter(node::Column::Tier.eq(i16::from(tier)));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(node::Column::IsActive.eq(is_active));
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.to_lowercase());
        query = query.filter(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(node::Column::Name))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(node::Column::Email))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(node::Column::City))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(node::Column::Country))).like(pattern)),
        );
    }

    match filter.ordering.as_deref() {
        Some("created_at") => query.order_by_asc(node::Column::CreatedAt),
        Some("name") => query.order_by_asc(node::Column::Name),
        Some("-name") => query.order_by_desc(node::Column::Name),
        Some("debt") => query.order_by_asc(node::Column::Debt),
        Some("-debt") => query.order_by_desc(node::Column::Debt),
        // Newest first, matching the storage default ordering
        _ => query.order_by_desc(node::Column::CreatedAt),
    }
}

#[async_trait]
impl NodeRepository for NodeStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Node>> {
        let model = node::Entity::find_by_id(id).one(&self.db).await?;

        match model {
            Some(model) => Ok(self.hydrate(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn name_taken(&self, name: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let mut query = node::Entity::find().filter(node::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(node::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    async fn supplier_link(&self, id: i64) -> AppResult<Option<SupplierLink>> {
        let model = node::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(|m| SupplierLink {
            id: m.id,
            tier: m.tier(),
            supplier_id: m.supplier_id,
        }))
    }

    async fn list(
        &self,
        filter: &NodeFilter,
        page: &PaginationParams,
    ) -> AppResult<(Vec<Node>, u64)> {
        let query = apply_filter(node::Entity::find(), filter);

        let paginator = query.paginate(&self.db, page.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page.saturating_sub(1)).await?;

        Ok((self.hydrate(models).await?, total))
    }

    async fn create(&self, data: NewNode) -> AppResult<Node> {
        let txn = self.db.begin().await?;

        let active = node::ActiveModel {
            name: Set(data.name),
            email: Set(data.email),
            country: Set(data.country),
            city: Set(data.city),
            street: Set(data.street),
            house_number: Set(data.house_number),
            supplier_id: Set(data.supplier_id),
            tier: Set(i16::from(data.tier)),
            debt: Set(data.debt),
            is_active: Set(data.is_active),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let model = active.insert(&txn).await?;

        if !data.product_ids.is_empty() {
            let links = data.product_ids.iter().map(|pid| node_product::ActiveModel {
                node_id: Set(model.id),
                product_id: Set(*pid),
            });
            node_product::Entity::insert_many(links).exec(&txn).await?;
        }

        txn.commit().await?;

        self.find_by_id(model.id)
            .await?
            .ok_or_else(|| AppError::internal("node missing after insert"))
    }

    async fn update(&self, id: i64, data: NodeUpdate) -> AppResult<Node> {
        let model = node::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let txn = self.db.begin().await?;

        let mut active: node::ActiveModel = model.into();
        active.name = Set(data.name);
        active.email = Set(data.email);
        active.country = Set(data.country);
        active.city = Set(data.city);
        active.street = Set(data.street);
        active.house_number = Set(data.house_number);
        active.supplier_id = Set(data.supplier_id);
        active.tier = Set(i16::from(data.tier));
        active.is_active = Set(data.is_active);

        active.update(&txn).await?;

        if let Some(product_ids) = data.product_ids {
            node_product::Entity::delete_many()
                .filter(node_product::Column::NodeId.eq(id))
                .exec(&txn)
                .await?;

            if !product_ids.is_empty() {
                let links = product_ids.iter().map(|pid| node_product::ActiveModel {
                    node_id: Set(id),
                    product_id: Set(*pid),
                });
                node_product::Entity::insert_many(links).exec(&txn).await?;
            }
        }

        txn.commit().await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("node missing after update"))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = node::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn clear_debt(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        // Single UPDATE statement: all targeted rows reach zero or,
        // on failure, none do.
        let result = node::Entity::update_many()
            .col_expr(node::Column::Debt, Expr::value(Decimal::ZERO))
            .filter(node::Column::Id.is_in(ids.to_vec()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn count_products(&self, ids: &[i64]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let count = product::Entity::find()
            .filter(product::Column::Id.is_in(ids.to_vec()))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}
