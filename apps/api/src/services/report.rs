//! Sales report service.

use std::sync::Arc;

use chrono::Utc;
use kasir_core::{ReportWindow, SalesReport, ValidationError};
use kasir_db::ReportStore;

use crate::error::ApiResult;

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn ReportStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        ReportService { store }
    }

    /// Report for the current UTC calendar day.
    pub async fn today(&self) -> ApiResult<SalesReport> {
        Ok(self.store.sales_report(ReportWindow::today(Utc::now())).await?)
    }

    /// Report for an inclusive `YYYY-MM-DD` range. Both bounds are required.
    pub async fn range(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ApiResult<SalesReport> {
        let start = start_date.ok_or_else(|| ValidationError::required("start_date"))?;
        let end = end_date.ok_or_else(|| ValidationError::required("end_date"))?;

        let window = ReportWindow::parse(start, end)?;
        Ok(self.store.sales_report(window).await?)
    }
}
