//! Product service.
//!
//! Products must point at an existing category when created or updated.
//! The schema does not enforce that, so it is checked here.

use std::sync::Arc;

use kasir_core::validation::validate_product_input;
use kasir_core::{CategoryId, CoreError, Product, ProductId, ProductInput, ValidationError};
use kasir_db::{CategoryStore, DbError, ProductStore};
use tracing::info;

use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    categories: Arc<dyn CategoryStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>, categories: Arc<dyn CategoryStore>) -> Self {
        ProductService {
            products,
            categories,
        }
    }

    /// Lists products, optionally only those whose name contains `name`
    /// (case-insensitive).
    pub async fn list(&self, name: Option<&str>) -> ApiResult<Vec<Product>> {
        Ok(self.products.list(name).await?)
    }

    pub async fn get(&self, id: ProductId) -> ApiResult<Product> {
        self.products
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Product", id))
    }

    pub async fn create(&self, input: ProductInput) -> ApiResult<Product> {
        validate_product_input(&input)?;
        self.ensure_category(input.category_id).await?;

        let product = self.products.create(&input).await?;
        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    pub async fn update(&self, id: ProductId, input: ProductInput) -> ApiResult<Product> {
        validate_product_input(&input)?;

        if self.products.get(id).await?.is_none() {
            return Err(ApiError::not_found("Product", id));
        }
        self.ensure_category(input.category_id).await?;

        Ok(self.products.update(id, &input).await?)
    }

    /// Fails with a validation error when a transaction line references the
    /// product.
    pub async fn delete(&self, id: ProductId) -> ApiResult<()> {
        match self.products.delete(id).await {
            Ok(()) => {
                info!(id, "Product deleted");
                Ok(())
            }
            Err(DbError::ForeignKeyViolation { .. }) => Err(ValidationError::StillReferenced {
                entity: "Product".to_string(),
                id,
                referenced_by: "transactions".to_string(),
            }
            .into()),
            Err(e) => Err(e.into()),
        }
    }

    async fn ensure_category(&self, id: CategoryId) -> ApiResult<()> {
        match self.categories.get(id).await? {
            Some(_) => Ok(()),
            None => Err(CoreError::CategoryNotFound(id).into()),
        }
    }
}
