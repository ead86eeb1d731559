//! Sales report API handlers.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use kasir_core::SalesReport;

use crate::error::ApiResult;
use crate::extract::ApiQuery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/report", get(range))
        .route("/api/report/today", get(today))
}

/// Query string of `GET /api/report`.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/report/today
async fn today(State(state): State<AppState>) -> ApiResult<Json<SalesReport>> {
    Ok(Json(state.reports.today().await?))
}

/// GET /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
async fn range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ReportQuery>,
) -> ApiResult<Json<SalesReport>> {
    let report = state
        .reports
        .range(query.start_date.as_deref(), query.end_date.as_deref())
        .await?;
    Ok(Json(report))
}
