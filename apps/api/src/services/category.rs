//! Category service.

use std::sync::Arc;

use kasir_core::validation::validate_category_input;
use kasir_core::{Category, CategoryId, CategoryInput};
use kasir_db::CategoryStore;
use tracing::info;

use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        CategoryService { store }
    }

    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, id: CategoryId) -> ApiResult<Category> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Category", id))
    }

    pub async fn create(&self, input: CategoryInput) -> ApiResult<Category> {
        validate_category_input(&input)?;

        let category = self.store.create(&input).await?;
        info!(id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: CategoryId, input: CategoryInput) -> ApiResult<Category> {
        validate_category_input(&input)?;

        Ok(self.store.update(id, &input).await?)
    }

    /// Products filed under the category are kept.
    pub async fn delete(&self, id: CategoryId) -> ApiResult<()> {
        self.store.delete(id).await?;
        info!(id, "Category deleted");
        Ok(())
    }
}
