//! Finance service: net profit reporting over the ledger

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared::{ledger_date_span, net_profit_report, validate_date_range, DateRange, NetProfitReport};

use crate::error::{AppError, AppResult};
use crate::store::PurchaseStore;

/// Finance service
#[derive(Clone)]
pub struct FinanceService {
    store: Arc<dyn PurchaseStore>,
}

impl FinanceService {
    pub fn new(store: Arc<dyn PurchaseStore>) -> Self {
        Self { store }
    }

    /// Net profit between two dates, both inclusive.
    ///
    /// A missing bound falls back to the first or last day on which the
    /// ledger has an entry.
    pub async fn net_profit_report(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<NetProfitReport> {
        let entries = self.store.list_finance_entries().await?;

        let span = ledger_date_span(&entries, Utc::now().date_naive());
        let range = DateRange::new(start_date.unwrap_or(span.start), end_date.unwrap_or(span.end));
        validate_date_range(&range).map_err(|msg| AppError::validation("start_date", msg))?;

        let report = net_profit_report(&entries, range);
        tracing::debug!(
            start = %range.start,
            end = %range.end,
            entries = report.entries.len(),
            net_profit = %report.net_profit,
            "Computed net profit"
        );

        Ok(report)
    }

    /// Export rows to CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
