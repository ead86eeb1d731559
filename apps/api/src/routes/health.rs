//! Health check routes.
//!
//! | Path            | Meaning                                   |
//! |-----------------|-------------------------------------------|
//! | `/health`       | The process is up. Always 200.            |
//! | `/health/ready` | The database answers and is migrated. 200, otherwise 503. |

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: "API is Running",
    })
}

/// GET /health/ready
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.health.is_ready().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK",
                message: "Database is reachable",
            }),
        )
    } else {
        tracing::warn!("Readiness check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "UNAVAILABLE",
                message: "Database is unreachable",
            }),
        )
    }
}
