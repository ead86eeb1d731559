//! Checkout API handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use kasir_core::{CheckoutRequest, Transaction};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/checkout", post(checkout))
}

/// POST /api/checkout
///
/// Responds 201 with the stored transaction and its line items.
async fn checkout(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state.checkout.checkout(request).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}
