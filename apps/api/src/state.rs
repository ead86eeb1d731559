//! Shared application state.

use std::sync::Arc;

use kasir_db::{Database, StoreHealth};

use crate::services::{CategoryService, CheckoutService, ProductService, ReportService};

/// State handed to every handler. Cloned per request; all fields are
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub products: ProductService,
    pub checkout: CheckoutService,
    pub reports: ReportService,
    pub health: Arc<dyn StoreHealth>,
}

impl AppState {
    /// Wires every service to the SQLite repositories of `db`.
    pub fn from_database(db: &Database) -> Self {
        let categories = Arc::new(db.categories());
        let products = Arc::new(db.products());

        AppState {
            categories: CategoryService::new(categories.clone()),
            products: ProductService::new(products.clone(), categories),
            checkout: CheckoutService::new(products, Arc::new(db.transactions())),
            reports: ReportService::new(Arc::new(db.reports())),
            health: Arc::new(db.clone()),
        }
    }
}
