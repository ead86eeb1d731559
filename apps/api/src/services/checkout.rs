//! # Checkout Service
//!
//! ```text
//! CheckoutRequest
//!      │
//!      ▼
//! validate shape ─────────────► VALIDATION_ERROR
//!      │
//!      ▼
//! products.get_many(ids)        (snapshot, outside any transaction)
//!      │
//!      ▼
//! plan_checkout ──────────────► NOT_FOUND / INSUFFICIENT_STOCK
//!      │
//!      ▼
//! transactions.record(plan) ──► INSUFFICIENT_STOCK (lost a race, rolled back)
//!      │
//!      ▼
//! Transaction
//! ```
//!
//! Nothing is written before `record`, so every rejection before it is free
//! of side effects.

use std::sync::Arc;

use kasir_core::checkout::plan_checkout;
use kasir_core::validation::validate_checkout_items;
use kasir_core::{CheckoutRequest, ProductId, Transaction};
use kasir_db::{CheckoutError, ProductStore, TransactionStore};
use tracing::warn;

use crate::error::ApiResult;

#[derive(Clone)]
pub struct CheckoutService {
    products: Arc<dyn ProductStore>,
    transactions: Arc<dyn TransactionStore>,
}

impl CheckoutService {
    pub fn new(products: Arc<dyn ProductStore>, transactions: Arc<dyn TransactionStore>) -> Self {
        CheckoutService {
            products,
            transactions,
        }
    }

    pub async fn checkout(&self, request: CheckoutRequest) -> ApiResult<Transaction> {
        validate_checkout_items(&request.items)?;

        let mut ids: Vec<ProductId> = request.items.iter().map(|item| item.product_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let snapshot = self.products.get_many(&ids).await?;

        let plan = plan_checkout(&request.items, &snapshot).map_err(|e| {
            warn!(error = %e, "Checkout rejected");
            e
        })?;

        match self.transactions.record(&plan).await {
            Ok(transaction) => Ok(transaction),
            Err(CheckoutError::Rejected(e)) => {
                warn!(error = %e, "Checkout rejected while committing");
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use kasir_core::{
        CheckoutItem, CheckoutPlan, CoreError, Money, Product, ProductInput, TransactionId,
        TransactionItem,
    };
    use kasir_db::{CheckoutResult, DbError, DbResult};

    use super::*;
    use crate::error::ErrorCode;

    /// Fixed catalogue; only `get_many` is used by checkout.
    struct StubProducts(HashMap<ProductId, Product>);

    #[async_trait]
    impl ProductStore for StubProducts {
        async fn list(&self, _: Option<&str>) -> DbResult<Vec<Product>> {
            Ok(self.0.values().cloned().collect())
        }

        async fn get(&self, id: ProductId) -> DbResult<Option<Product>> {
            Ok(self.0.get(&id).cloned())
        }

        async fn get_many(&self, ids: &[ProductId]) -> DbResult<HashMap<ProductId, Product>> {
            Ok(ids
                .iter()
                .filter_map(|id| self.0.get(id).map(|p| (*id, p.clone())))
                .collect())
        }

        async fn create(&self, _: &ProductInput) -> DbResult<Product> {
            Err(DbError::Internal("read-only stub".to_string()))
        }

        async fn update(&self, id: ProductId, _: &ProductInput) -> DbResult<Product> {
            Err(DbError::not_found("Product", id))
        }

        async fn delete(&self, id: ProductId) -> DbResult<()> {
            Err(DbError::not_found("Product", id))
        }
    }

    /// Records plans in memory, or refuses every one as if another checkout
    /// had taken the stock first.
    #[derive(Default)]
    struct StubTransactions {
        recorded: Mutex<Vec<CheckoutPlan>>,
        lose_race: bool,
    }

    #[async_trait]
    impl TransactionStore for StubTransactions {
        async fn record(&self, plan: &CheckoutPlan) -> CheckoutResult<Transaction> {
            if self.lose_race {
                let line = &plan.lines()[0];
                return Err(CoreError::InsufficientStock {
                    product_id: line.product_id,
                    name: line.product_name.clone(),
                    available: Some(0),
                    requested: line.quantity,
                }
                .into());
            }

            let mut recorded = self.recorded.lock().unwrap();
            recorded.push(plan.clone());
            let id = recorded.len() as TransactionId;

            Ok(Transaction {
                id,
                created_at: Utc::now(),
                total_amount: plan.total_amount(),
                items: plan
                    .lines()
                    .iter()
                    .enumerate()
                    .map(|(i, line)| TransactionItem {
                        id: i as i64 + 1,
                        transaction_id: id,
                        product_id: line.product_id,
                        product_name: line.product_name.clone(),
                        quantity: line.quantity,
                        unit_price: line.unit_price,
                        line_total: line.line_total,
                    })
                    .collect(),
            })
        }

        async fn get(&self, _: TransactionId) -> DbResult<Option<Transaction>> {
            Ok(None)
        }
    }

    fn catalogue() -> StubProducts {
        let product = Product {
            id: 1,
            name: "Kopi Susu".to_string(),
            price: Money::from_minor(3500),
            stock: 10,
            category_id: 1,
            category_name: Some("Minuman".to_string()),
        };
        StubProducts(HashMap::from([(1, product)]))
    }

    fn request(items: &[(ProductId, i64)]) -> CheckoutRequest {
        CheckoutRequest {
            items: items
                .iter()
                .map(|(product_id, quantity)| CheckoutItem {
                    product_id: *product_id,
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_checkout_prices_from_snapshot() {
        let transactions = Arc::new(StubTransactions::default());
        let service = CheckoutService::new(Arc::new(catalogue()), transactions.clone());

        let transaction = service.checkout(request(&[(1, 3)])).await.unwrap();

        assert_eq!(transaction.total_amount, Money::from_minor(10500));
        assert_eq!(transaction.items[0].unit_price, Money::from_minor(3500));
        assert_eq!(transactions.recorded.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejections_write_nothing() {
        let transactions = Arc::new(StubTransactions::default());
        let service = CheckoutService::new(Arc::new(catalogue()), transactions.clone());

        let err = service.checkout(request(&[(1, 11)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        let err = service.checkout(request(&[(2, 1)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = service.checkout(request(&[])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(transactions.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lost_race_is_insufficient_stock() {
        let transactions = Arc::new(StubTransactions {
            lose_race: true,
            ..Default::default()
        });
        let service = CheckoutService::new(Arc::new(catalogue()), transactions);

        let err = service.checkout(request(&[(1, 1)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
    }
}
