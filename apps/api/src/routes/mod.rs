//! # HTTP Routes
//!
//! | Path                        | Methods            | Module         |
//! |-----------------------------|--------------------|----------------|
//! | `/api/categories`           | GET, POST          | [`categories`] |
//! | `/api/categories/{id}`      | GET, PUT, DELETE   | [`categories`] |
//! | `/api/products`             | GET (`?name=`), POST | [`products`] |
//! | `/api/products/{id}`        | GET, PUT, DELETE   | [`products`]   |
//! | `/api/checkout`             | POST               | [`checkout`]   |
//! | `/api/report/today`         | GET                | [`report`]     |
//! | `/api/report`               | GET (`?start_date=&end_date=`) | [`report`] |
//! | `/health`, `/health/ready`  | GET                | [`health`]     |

pub mod categories;
pub mod checkout;
pub mod health;
pub mod products;
pub mod report;


use axum::Router;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// `{"message": ...}` body returned by deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Routes without middleware or state.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(categories::router())
        .merge(products::router())
        .merge(checkout::router())
        .merge(report::router())
        .merge(health::router())
}

/// The complete application: routes, middleware and state.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
