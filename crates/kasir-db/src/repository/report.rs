//! # Report Repository
//!
//! Sales aggregation over a [`ReportWindow`]. Read-only.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::store::ReportStore;
use kasir_core::{BestSellingProduct, Money, ReportWindow, SalesReport};

/// Repository for sales reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }
}

#[async_trait]
impl ReportStore for ReportRepository {
    async fn sales_report(&self, window: ReportWindow) -> DbResult<SalesReport> {
        debug!(start = %window.start(), end = %window.end(), "Building sales report");

        let (total_revenue, total_transactions): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(total_amount), 0),
                COUNT(*)
            FROM transactions
            WHERE DATE(created_at) BETWEEN ?1 AND ?2
            "#,
        )
        .bind(window.start())
        .bind(window.end())
        .fetch_one(&self.pool)
        .await?;

        // Ties resolve by product id so the result is stable.
        let best_product = sqlx::query_as::<_, BestSellingProduct>(
            r#"
            SELECT
                p.name AS name,
                SUM(td.quantity) AS qty_sold
            FROM transaction_details td
            JOIN transactions t ON t.id = td.transaction_id
            JOIN products p ON p.id = td.product_id
            WHERE DATE(t.created_at) BETWEEN ?1 AND ?2
            GROUP BY td.product_id, p.name
            ORDER BY qty_sold DESC, td.product_id
            LIMIT 1
            "#,
        )
        .bind(window.start())
        .bind(window.end())
        .fetch_optional(&self.pool)
        .await?
        .unwrap_or_default();

        Ok(SalesReport {
            total_revenue: Money::from_minor(total_revenue),
            total_transactions,
            best_product,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
