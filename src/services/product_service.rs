//! Product service - catalogue business logic.
//!
//! Products carry no invariants beyond field presence, so this layer is
//! a thin passthrough to the repository.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewProduct, Product, ProductFilter};
use crate::errors::{AppError, AppResult};
use crate::infra::ProductRepository;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Get product by ID
    async fn get_product(&self, id: i64) -> AppResult<Product>;

    /// List products matching the filter
    async fn list_products(&self, filter: ProductFilter) -> AppResult<Vec<Product>>;

    /// Create a product
    async fn create_product(&self, data: NewProduct) -> AppResult<Product>;

    /// Full update of a product
    async fn update_product(&self, id: i64, data: NewProduct) -> AppResult<Product>;

    /// Delete a product
    async fn delete_product(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of ProductService.
pub struct ProductManager<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductManager<R> {
    /// Create new product service instance
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: ProductRepository> ProductService for ProductManager<R> {
    async fn get_product(&self, id: i64) -> AppResult<Product> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_products(&self, filter: ProductFilter) -> AppResult<Vec<Product>> {
        self.repo.list(&filter).await
    }

    async fn create_product(&self, data: NewProduct) -> AppResult<Product> {
        self.repo.create(data).await
    }

    async fn update_product(&self, id: i64, data: NewProduct) -> AppResult<Product> {
        self.repo.update(id, data).await
    }

    async fn delete_product(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
