//! # Store Traits
//!
//! The capabilities the HTTP services need from persistence, one trait per
//! aggregate. The SQLite repositories in [`crate::repository`] implement
//! them; tests can swap in their own.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────────┐     ┌──────────────────────┐
//! │  handlers        │────►│  services            │────►│  Arc<dyn XxxStore>   │
//! │  (axum)          │     │  (validation, rules) │     │  SQLite / test stub  │
//! └──────────────────┘     └──────────────────────┘     └──────────────────────┘
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use kasir_core::{
    CategoryId, CheckoutPlan, Category, CategoryInput, Product, ProductId, ProductInput,
    ReportWindow, SalesReport, Transaction, TransactionId,
};

use crate::error::{CheckoutResult, DbResult};

/// Category persistence.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories, ordered by id.
    async fn list(&self) -> DbResult<Vec<Category>>;

    async fn get(&self, id: CategoryId) -> DbResult<Option<Category>>;

    async fn create(&self, input: &CategoryInput) -> DbResult<Category>;

    /// Replaces name and description. `NotFound` if no row has `id`.
    async fn update(&self, id: CategoryId, input: &CategoryInput) -> DbResult<Category>;

    /// `NotFound` if no row has `id`.
    async fn delete(&self, id: CategoryId) -> DbResult<()>;
}

/// Product persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by id, optionally filtered by a case-insensitive
    /// substring of the name.
    async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<Product>>;

    async fn get(&self, id: ProductId) -> DbResult<Option<Product>>;

    /// Loads the products with the given ids. Missing ids are simply absent
    /// from the returned map.
    async fn get_many(&self, ids: &[ProductId]) -> DbResult<HashMap<ProductId, Product>>;

    async fn create(&self, input: &ProductInput) -> DbResult<Product>;

    /// `NotFound` if no row has `id`.
    async fn update(&self, id: ProductId, input: &ProductInput) -> DbResult<Product>;

    /// `NotFound` if no row has `id`, `ForeignKeyViolation` if a transaction
    /// line still references it.
    async fn delete(&self, id: ProductId) -> DbResult<()>;
}

/// Transaction persistence.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Writes a priced checkout atomically: header, stock decrements, lines.
    ///
    /// Fails with `Rejected(InsufficientStock)` when stock was taken between
    /// planning and writing; nothing is written in that case.
    async fn record(&self, plan: &CheckoutPlan) -> CheckoutResult<Transaction>;

    /// A stored transaction with its line items.
    async fn get(&self, id: TransactionId) -> DbResult<Option<Transaction>>;
}

/// Sales aggregation.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn sales_report(&self, window: ReportWindow) -> DbResult<SalesReport>;
}

/// Liveness of the underlying store, for readiness probes.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn is_ready(&self) -> bool;
}
