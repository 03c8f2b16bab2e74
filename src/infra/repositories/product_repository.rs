//! Product repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::product;
use crate::domain::{NewProduct, Product, ProductFilter};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// List products matching the filter
    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;

    /// Insert a new product
    async fn create(&self, data: NewProduct) -> AppResult<Product>;

    /// Full update of an existing product
    async fn update(&self, id: i64, data: NewProduct) -> AppResult<Product>;

    /// Delete product by ID
    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let model = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let mut query = product::Entity::find();

        if let Some(search) = &filter.search {
            let pattern = format!("%{}%", search.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(product::Column::Name)))
                            .like(pattern.clone()),
                    )
                    .add(Expr::expr(Func::lower(Expr::col(product::Column::Model))).like(pattern)),
            );
        }

        query = match filter.ordering.as_deref() {
            Some("name") => query.order_by_asc(product::Column::Name),
            Some("-name") => query.order_by_desc(product::Column::Name),
            Some("release_date") => query.order_by_asc(product::Column::ReleaseDate),
            // Newest releases first by default
            _ => query.order_by_desc(product::Column::ReleaseDate),
        };

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn create(&self, data: NewProduct) -> AppResult<Product> {
        let active = product::ActiveModel {
            name: Set(data.name),
            model: Set(data.model),
            release_date: Set(data.release_date),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(Product::from(model))
    }

    async fn update(&self, id: i64, data: NewProduct) -> AppResult<Product> {
        let model = product::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: product::ActiveModel = model.into();
        active.name = Set(data.name);
        active.model = Set(data.model);
        active.release_date = Set(data.release_date);

        let model = active.update(&self.db).await?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
