//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Name Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/products?name=kopi                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  list(Some("kopi"))                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE p.name LIKE '%kopi%' ESCAPE '\'                                 │
//! │       │         (LIKE is case-insensitive for ASCII in SQLite)         │
//! │       ▼                                                                 │
//! │  "Kopi Susu", "Es Kopi", "KOPI HITAM"                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every read LEFT JOINs `categories` so a product whose category was
//! deleted is still returned, with `category_name` null.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::ProductStore;
use kasir_core::{Product, ProductId, ProductInput};

/// Ids bound per `IN (...)` query in `get_many`; SQLite caps bind
/// parameters per statement.
const GET_MANY_CHUNK: usize = 500;

const SELECT_PRODUCT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.price,
        p.stock,
        p.category_id,
        c.name AS category_name
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
"#;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Counts total products (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn fetch_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} WHERE p.id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<Product>> {
        let filter = name_filter.map(str::trim).filter(|f| !f.is_empty());
        debug!(filter = ?filter, "Listing products");

        let products = match filter {
            Some(filter) => {
                sqlx::query_as::<_, Product>(&format!(
                    "{SELECT_PRODUCT} WHERE p.name LIKE ?1 ESCAPE '\\' ORDER BY p.id"
                ))
                .bind(like_pattern(filter))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(&format!("{SELECT_PRODUCT} ORDER BY p.id"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(products)
    }

    async fn get(&self, id: ProductId) -> DbResult<Option<Product>> {
        self.fetch_by_id(id).await
    }

    async fn get_many(&self, ids: &[ProductId]) -> DbResult<HashMap<ProductId, Product>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut found = HashMap::with_capacity(ids.len());

        for chunk in ids.chunks(GET_MANY_CHUNK) {
            let mut query: QueryBuilder<'_, Sqlite> = QueryBuilder::new(SELECT_PRODUCT);
            query.push(" WHERE p.id IN (");
            let mut separated = query.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");

            let products: Vec<Product> = query.build_query_as().fetch_all(&self.pool).await?;
            found.extend(products.into_iter().map(|p| (p.id, p)));
        }

        Ok(found)
    }

    async fn create(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(name = %input.name, category_id = input.category_id, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, stock, category_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    async fn update(&self, id: ProductId, input: &ProductInput) -> DbResult<Product> {
        debug!(id, name = %input.name, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                price = ?3,
                stock = ?4,
                category_id = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    async fn delete(&self, id: ProductId) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

/// Builds a `LIKE` pattern matching `needle` anywhere, with `%`, `_` and
/// `\` taken literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CategoryStore;
    use crate::{Database, DbConfig};
    use kasir_core::{CategoryInput, Money};

    async fn setup() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let category = db
            .categories()
            .create(&CategoryInput {
                name: "Minuman".to_string(),
                description: None,
            })
            .await
            .unwrap();
        (db, category.id)
    }

    fn input(name: &str, price: i64, stock: i64, category_id: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: Money::from_minor(price),
            stock,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_returns_category_name() {
        let (db, category_id) = setup().await;

        let product = db
            .products()
            .create(&input("Kopi Susu", 3500, 10, category_id))
            .await
            .unwrap();

        assert!(product.id > 0);
        assert_eq!(product.price, Money::from_minor(3500));
        assert_eq!(product.stock, 10);
        assert_eq!(product.category_name.as_deref(), Some("Minuman"));
    }

    #[tokio::test]
    async fn test_list_with_name_filter() {
        let (db, category_id) = setup().await;
        let repo = db.products();
        repo.create(&input("Kopi Susu", 3500, 10, category_id)).await.unwrap();
        repo.create(&input("Es KOPI", 5000, 10, category_id)).await.unwrap();
        repo.create(&input("Teh Botol", 4000, 10, category_id)).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 3);
        assert_eq!(repo.list(Some("  ")).await.unwrap().len(), 3);

        let names: Vec<String> = repo
            .list(Some("kopi"))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Kopi Susu", "Es KOPI"]);

        assert!(repo.list(Some("%")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_many_skips_missing() {
        let (db, category_id) = setup().await;
        let repo = db.products();
        let a = repo.create(&input("A", 100, 1, category_id)).await.unwrap();
        let b = repo.create(&input("B", 200, 2, category_id)).await.unwrap();

        let found = repo.get_many(&[a.id, b.id, 999]).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[&b.id].price, Money::from_minor(200));
        assert!(repo.get_many(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_many_beyond_bind_limit() {
        let (db, category_id) = setup().await;
        let repo = db.products();
        let a = repo.create(&input("A", 100, 1, category_id)).await.unwrap();
        let b = repo.create(&input("B", 200, 2, category_id)).await.unwrap();

        // more ids than SQLite accepts as bind parameters in one statement
        let mut ids: Vec<ProductId> = (1_000..34_000).collect();
        ids.push(a.id);
        ids.push(b.id);

        let found = repo.get_many(&ids).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.contains_key(&a.id));
        assert!(found.contains_key(&b.id));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, category_id) = setup().await;
        let repo = db.products();
        let product = repo.create(&input("Kopi", 3500, 10, category_id)).await.unwrap();

        let updated = repo
            .update(product.id, &input("Kopi Hitam", 4000, 8, category_id))
            .await
            .unwrap();
        assert_eq!(updated.name, "Kopi Hitam");
        assert_eq!(updated.stock, 8);

        repo.delete(product.id).await.unwrap();
        assert!(repo.get(product.id).await.unwrap().is_none());
        assert!(repo.delete(product.id).await.unwrap_err().is_not_found());
        assert!(repo
            .update(product.id, &input("X", 1, 1, category_id))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_deleted_category_leaves_product() {
        let (db, category_id) = setup().await;
        let product = db
            .products()
            .create(&input("Kopi", 3500, 10, category_id))
            .await
            .unwrap();

        db.categories().delete(category_id).await.unwrap();

        let product = db.products().get(product.id).await.unwrap().unwrap();
        assert_eq!(product.category_id, category_id);
        assert_eq!(product.category_name, None);
    }

    #[tokio::test]
    async fn test_negative_stock_rejected_by_schema() {
        let (db, category_id) = setup().await;
        let err = db
            .products()
            .create(&input("Kopi", 3500, -1, category_id))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("kopi"), "%kopi%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
