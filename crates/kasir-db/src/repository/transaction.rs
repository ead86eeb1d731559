//! # Transaction Repository
//!
//! Writes priced checkouts and reads them back.
//!
//! ## Checkout Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record(plan) - one SQLite transaction                │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │   │                                                                     │
//! │   ├── INSERT INTO transactions (total_amount, created_at)              │
//! │   │                                                                     │
//! │   ├── for each product in plan.stock_demand():                         │
//! │   │     UPDATE products SET stock = stock - qty                        │
//! │   │     WHERE id = ? AND stock >= qty                                  │
//! │   │       └── 0 rows? ── ROLLBACK ──► InsufficientStock                │
//! │   │                                                                     │
//! │   ├── for each line: INSERT INTO transaction_details                   │
//! │   │                                                                     │
//! │  COMMIT ──► Transaction { id, created_at, total_amount, items }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first statement is a write, so the transaction takes SQLite's write
//! lock up front and concurrent checkouts queue on the busy timeout. The
//! conditional decrement is what guarantees stock never goes negative.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{CheckoutResult, DbResult};
use crate::store::TransactionStore;
use kasir_core::{
    CheckoutPlan, CoreError, Money, Transaction, TransactionId, TransactionItem,
};

/// Header row of the `transactions` table.
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: TransactionId,
    total_amount: Money,
    created_at: DateTime<Utc>,
}

/// Repository for transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Gets all line items for a transaction, in insertion order.
    pub async fn get_items(&self, transaction_id: TransactionId) -> DbResult<Vec<TransactionItem>> {
        let items = sqlx::query_as::<_, TransactionItem>(
            r#"
            SELECT
                id,
                transaction_id,
                product_id,
                product_name,
                quantity,
                unit_price,
                line_total
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts stored transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn record(&self, plan: &CheckoutPlan) -> CheckoutResult<Transaction> {
        // Stored with millisecond precision; truncate so the returned value
        // matches what a later read gives back.
        let created_at = Utc::now().trunc_subsecs(3);
        let created_at_text = created_at.to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut tx = self.pool.begin().await?;

        let header = sqlx::query("INSERT INTO transactions (total_amount, created_at) VALUES (?1, ?2)")
            .bind(plan.total_amount())
            .bind(&created_at_text)
            .execute(&mut *tx)
            .await?;
        let transaction_id = header.last_insert_rowid();

        for (product_id, quantity) in plan.stock_demand() {
            let updated = sqlx::query(
                "UPDATE products SET stock = stock - ?2 WHERE id = ?1 AND stock >= ?2",
            )
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

            if updated.rows_affected() == 0 {
                let available: Option<i64> =
                    sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                        .bind(product_id)
                        .fetch_optional(&mut *tx)
                        .await?;
                tx.rollback().await?;

                warn!(product_id, quantity, ?available, "Stock taken by a concurrent checkout");

                let err = match available {
                    None => CoreError::ProductNotFound(product_id),
                    Some(stock) => CoreError::InsufficientStock {
                        product_id,
                        name: plan.product_name(product_id).unwrap_or_default().to_string(),
                        available: Some(stock),
                        requested: quantity,
                    },
                };
                return Err(err.into());
            }
        }

        let mut items = Vec::with_capacity(plan.lines().len());
        for line in plan.lines() {
            let inserted = sqlx::query(
                r#"
                INSERT INTO transaction_details (
                    transaction_id, product_id, product_name,
                    quantity, unit_price, line_total
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(transaction_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.unit_price)
            .bind(line.line_total)
            .execute(&mut *tx)
            .await?;

            items.push(TransactionItem {
                id: inserted.last_insert_rowid(),
                transaction_id,
                product_id: line.product_id,
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            });
        }

        tx.commit().await?;

        info!(
            transaction_id,
            total_amount = %plan.total_amount(),
            lines = items.len(),
            "Checkout recorded"
        );

        Ok(Transaction {
            id: transaction_id,
            created_at,
            total_amount: plan.total_amount(),
            items,
        })
    }

    async fn get(&self, id: TransactionId) -> DbResult<Option<Transaction>> {
        debug!(id, "Loading transaction");

        let header = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        let items = self.get_items(header.id).await?;

        Ok(Some(Transaction {
            id: header.id,
            created_at: header.created_at,
            total_amount: header.total_amount,
            items,
        }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::*;
    use crate::error::CheckoutError;
    use crate::store::{CategoryStore, ProductStore, ReportStore};
    use crate::{Database, DbConfig};
    use kasir_core::checkout::plan_checkout;
    use kasir_core::{CategoryInput, CheckoutItem, Product, ProductInput, ReportWindow};

    async fn seed_product(db: &Database, price: i64, stock: i64) -> Product {
        let category = db
            .categories()
            .create(&CategoryInput {
                name: "Minuman".to_string(),
                description: None,
            })
            .await
            .unwrap();
        db.products()
            .create(&ProductInput {
                name: "Kopi Susu".to_string(),
                price: Money::from_minor(price),
                stock,
                category_id: category.id,
            })
            .await
            .unwrap()
    }

    fn plan_for(product: &Product, quantity: i64) -> CheckoutPlan {
        let snapshot = HashMap::from([(product.id, product.clone())]);
        plan_checkout(
            &[CheckoutItem {
                product_id: product.id,
                quantity,
            }],
            &snapshot,
        )
        .unwrap()
    }

    async fn stock_of(db: &Database, id: i64) -> i64 {
        db.products().get(id).await.unwrap().unwrap().stock
    }

    #[tokio::test]
    async fn test_record_decrements_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 3500, 10).await;

        let transaction = db.transactions().record(&plan_for(&product, 3)).await.unwrap();

        assert_eq!(transaction.total_amount, Money::from_minor(10500));
        assert_eq!(transaction.items.len(), 1);
        assert_eq!(transaction.items[0].unit_price, Money::from_minor(3500));
        assert_eq!(transaction.items[0].line_total, Money::from_minor(10500));
        assert_eq!(transaction.items_total(), transaction.total_amount);
        assert_eq!(stock_of(&db, product.id).await, 7);
    }

    #[tokio::test]
    async fn test_get_reads_back_recorded_transaction() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 3500, 10).await;
        let recorded = db.transactions().record(&plan_for(&product, 2)).await.unwrap();

        let loaded = db.transactions().get(recorded.id).await.unwrap().unwrap();
        assert_eq!(loaded, recorded);
        assert!(db.transactions().get(recorded.id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_price_edit_does_not_rewrite_history() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 3500, 10).await;
        let recorded = db.transactions().record(&plan_for(&product, 3)).await.unwrap();

        let window = ReportWindow::today(chrono::Utc::now());
        let before = db.reports().sales_report(window).await.unwrap();

        db.products()
            .update(
                product.id,
                &ProductInput {
                    name: "Kopi Susu Gula Aren".to_string(),
                    price: Money::from_minor(9000),
                    stock: 7,
                    category_id: product.category_id,
                },
            )
            .await
            .unwrap();

        let loaded = db.transactions().get(recorded.id).await.unwrap().unwrap();
        assert_eq!(loaded.items[0].unit_price, Money::from_minor(3500));
        assert_eq!(loaded.items[0].line_total, Money::from_minor(10500));
        assert_eq!(loaded.items[0].product_name, "Kopi Susu");
        assert_eq!(loaded.total_amount, Money::from_minor(10500));

        let after = db.reports().sales_report(window).await.unwrap();
        assert_eq!(after.total_revenue, Money::from_minor(10500));
        assert_eq!(after.total_revenue, before.total_revenue);
    }

    #[tokio::test]
    async fn test_stale_plan_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 3500, 5).await;

        // planned against stock 5, but someone sells 4 first
        let stale = plan_for(&product, 3);
        db.transactions().record(&plan_for(&product, 4)).await.unwrap();

        let err = db.transactions().record(&stale).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Rejected(CoreError::InsufficientStock {
                available: Some(1),
                requested: 3,
                ..
            })
        ));

        assert_eq!(stock_of(&db, product.id).await, 1);
        assert_eq!(db.transactions().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_product_with_sales_cannot_be_deleted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = seed_product(&db, 3500, 5).await;
        db.transactions().record(&plan_for(&product, 1)).await.unwrap();

        let err = db.products().delete(product.id).await.unwrap_err();
        assert!(matches!(err, crate::DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_checkouts_never_oversell() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("kasir.db")).max_connections(4))
            .await
            .unwrap();
        let product = seed_product(&db, 1000, 1).await;
        let plan = Arc::new(plan_for(&product, 1));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = db.transactions();
            let plan = Arc::clone(&plan);
            handles.push(tokio::spawn(async move { repo.record(&plan).await }));
        }

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(CheckoutError::Rejected(CoreError::InsufficientStock { .. })) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(stock_of(&db, product.id).await, 0);
        assert_eq!(db.transactions().count().await.unwrap(), 1);
    }
}
