//! Node service - supply-network business logic.
//!
//! Every mutation funnels through the same sequence before anything is
//! persisted: uniqueness check, financial mutation guard, supplier
//! snapshot read, hierarchy derivation. All checks are synchronous and
//! happen before the repository write, so a failed call leaves no
//! partial state behind.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    debt, hierarchy, CreateNode, NewNode, Node, NodeFilter, NodeUpdate, SupplierLink, UpdateNode,
};
use crate::errors::{AppError, AppResult};
use crate::infra::NodeRepository;
use crate::types::PaginationParams;

/// Node service trait for dependency injection.
#[async_trait]
pub trait NodeService: Send + Sync {
    /// Get node by ID
    async fn get_node(&self, id: i64) -> AppResult<Node>;

    /// List nodes matching the filter, paginated; returns (page, total)
    async fn list_nodes(
        &self,
        filter: NodeFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Node>, u64)>;

    /// Create a node, deriving its tier from the proposed supplier
    async fn create_node(&self, input: CreateNode) -> AppResult<Node>;

    /// Full update of a node, re-deriving its tier; debt is untouchable here
    async fn update_node(&self, id: i64, input: UpdateNode) -> AppResult<Node>;

    /// Delete a node
    async fn delete_node(&self, id: i64) -> AppResult<()>;

    /// Privileged bulk action: zero the debt of the targeted nodes,
    /// returning how many rows were touched
    async fn clear_debt(&self, ids: Vec<i64>) -> AppResult<u64>;
}

/// Concrete implementation of NodeService.
pub struct NodeManager<R: NodeRepository> {
    repo: Arc<R>,
}

impl<R: NodeRepository> NodeManager<R> {
    /// Create new node service instance
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Read the supplier snapshot for a proposed supplier id.
    ///
    /// A dangling supplier reference is a plain validation failure, not
    /// a 404: the node being saved exists, its payload is wrong.
    async fn resolve_supplier(&self, supplier_id: Option<i64>) -> AppResult<Option<SupplierLink>> {
        match supplier_id {
            None => Ok(None),
            Some(id) => {
                let link = self
                    .repo
                    .supplier_link(id)
                    .await?
                    .ok_or_else(|| AppError::validation("supplier does not exist"))?;
                Ok(Some(link))
            }
        }
    }

    /// Fail unless every referenced product id exists.
    async fn check_products(&self, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let found = self.repo.count_products(ids).await?;
        if found != ids.len() as u64 {
            return Err(AppError::validation("one or more products do not exist"));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: NodeRepository> NodeService for NodeManager<R> {
    async fn get_node(&self, id: i64) -> AppResult<Node> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_nodes(
        &self,
        filter: NodeFilter,
        page: PaginationParams,
    ) -> AppResult<(Vec<Node>, u64)> {
        self.repo.list(&filter, &page).await
    }

    async fn create_node(&self, input: CreateNode) -> AppResult<Node> {
        if self.repo.name_taken(&input.name, None).await? {
            return Err(AppError::conflict("Node"));
        }

        let debt = debt::validate_initial_debt(input.debt)?;

        let supplier = self.resolve_supplier(input.supplier_id).await?;
        let tier = hierarchy::derive_and_validate(None, supplier.as_ref())?;

        self.check_products(&input.product_ids).await?;

        self.repo
            .create(NewNode {
                name: input.name,
                email: input.email,
                country: input.country,
                city: input.city,
                street: input.street,
                house_number: input.house_number,
                supplier_id: input.supplier_id,
                tier,
                debt,
                is_active: input.is_active,
                product_ids: input.product_ids,
            })
            .await
    }

    async fn update_node(&self, id: i64, input: UpdateNode) -> AppResult<Node> {
        // The debt guard has already run against the raw payload at the
        // transport boundary; UpdateNode carries no debt field at all.
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        if self.repo.name_taken(&input.name, Some(id)).await? {
            return Err(AppError::conflict("Node"));
        }

        let supplier = self.resolve_supplier(input.supplier_id).await?;
        let tier = hierarchy::derive_and_validate(Some(id), supplier.as_ref())?;

        if let Some(product_ids) = &input.product_ids {
            self.check_products(product_ids).await?;
        }

        self.repo
            .update(
                id,
                NodeUpdate {
                    name: input.name,
                    email: input.email,
                    country: input.country,
                    city: input.city,
                    street: input.street,
                    house_number: input.house_number,
                    supplier_id: input.supplier_id,
                    tier,
                    is_active: input.is_active,
                    product_ids: input.product_ids,
                },
            )
            .await
    }

    async fn delete_node(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await
    }

    async fn clear_debt(&self, ids: Vec<i64>) -> AppResult<u64> {
        let cleared = self.repo.clear_debt(&ids).await?;
        tracing::info!(cleared, "debt cleared by privileged bulk action");
        Ok(cleared)
    }
}
