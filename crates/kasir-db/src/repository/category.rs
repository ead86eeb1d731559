//! # Category Repository
//!
//! Database operations for categories.
//!
//! Deleting a category does not touch its products; they keep their
//! `category_id` and report `category_name: null` from then on.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::CategoryStore;
use kasir_core::{Category, CategoryId, CategoryInput};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Counts categories (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn get(&self, id: CategoryId) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, input: &CategoryInput) -> DbResult<Category> {
        debug!(name = %input.name, "Inserting category");

        let result = sqlx::query("INSERT INTO categories (name, description) VALUES (?1, ?2)")
            .bind(input.name.trim())
            .bind(&input.description)
            .execute(&self.pool)
            .await?;

        Ok(Category {
            id: result.last_insert_rowid(),
            name: input.name.trim().to_string(),
            description: input.description.clone(),
        })
    }

    async fn update(&self, id: CategoryId, input: &CategoryInput) -> DbResult<Category> {
        debug!(id, name = %input.name, "Updating category");

        let result = sqlx::query("UPDATE categories SET name = ?2, description = ?3 WHERE id = ?1")
            .bind(id)
            .bind(input.name.trim())
            .bind(&input.description)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(Category {
            id,
            name: input.name.trim().to_string(),
            description: input.description.clone(),
        })
    }

    async fn delete(&self, id: CategoryId) -> DbResult<()> {
        debug!(id, "Deleting category");

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn repo() -> CategoryRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().categories()
    }

    fn input(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            description: Some("Minuman dingin".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = repo().await;

        let created = repo.create(&input("Minuman")).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.description.as_deref(), Some("Minuman dingin"));
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let repo = repo().await;
        repo.create(&input("Minuman")).await.unwrap();
        repo.create(&input("Makanan")).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Minuman", "Makanan"]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update() {
        let repo = repo().await;
        let created = repo.create(&input("Minuman")).await.unwrap();

        let updated = repo
            .update(
                created.id,
                &CategoryInput {
                    name: "Minuman Dingin".to_string(),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Minuman Dingin");

        let fetched = repo.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.description, None);
    }

    #[tokio::test]
    async fn test_missing_rows() {
        let repo = repo().await;

        assert!(repo.get(404).await.unwrap().is_none());
        assert!(repo.update(404, &input("X")).await.unwrap_err().is_not_found());
        assert!(repo.delete(404).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let created = repo.create(&input("Minuman")).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(repo.get(created.id).await.unwrap().is_none());
    }
}
