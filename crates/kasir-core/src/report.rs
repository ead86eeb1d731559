//! Report windows.
//!
//! A window is an inclusive range of calendar dates. Transactions are placed
//! in a window by the UTC date of their `created_at`.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ValidationError;
use crate::validation::{parse_report_date, ValidationResult};

/// Inclusive `[start, end]` date range for a sales report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    /// The single-day window containing `now`.
    pub fn today(now: DateTime<Utc>) -> Self {
        let date = now.date_naive();
        ReportWindow {
            start: date,
            end: date,
        }
    }

    /// Builds a window, rejecting `start > end`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> ValidationResult<Self> {
        if start > end {
            return Err(ValidationError::invalid_format(
                "start_date",
                "start_date must not be after end_date",
            ));
        }
        Ok(ReportWindow { start, end })
    }

    /// Parses `start_date` and `end_date` query values.
    ///
    /// ```rust
    /// use kasir_core::ReportWindow;
    ///
    /// let window = ReportWindow::parse("2026-10-01", "2026-10-17").unwrap();
    /// assert_eq!(window.start().to_string(), "2026-10-01");
    /// assert!(ReportWindow::parse("2026-10-17", "2026-10-01").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> ValidationResult<Self> {
        let start = parse_report_date("start_date", start)?;
        let end = parse_report_date("end_date", end)?;
        Self::between(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_uses_utc_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 23, 59, 59).unwrap();
        let window = ReportWindow::today(now);
        assert_eq!(window.start(), date(2026, 10, 17));
        assert_eq!(window.end(), date(2026, 10, 17));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let window = ReportWindow::between(date(2026, 1, 1), date(2026, 1, 1)).unwrap();
        assert_eq!(window.start(), window.end());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = ReportWindow::between(date(2026, 2, 1), date(2026, 1, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_parse_errors_name_the_field() {
        assert_eq!(
            ReportWindow::parse("", "2026-01-01"),
            Err(ValidationError::required("start_date"))
        );
        assert!(matches!(
            ReportWindow::parse("2026-01-01", "tomorrow"),
            Err(ValidationError::InvalidFormat { field, .. }) if field == "end_date"
        ));
    }
}
