//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type CustomerId = i64;
pub type ProductId = i64;
pub type SupplierId = i64;
pub type PurchaseId = i64;
pub type FinanceEntryId = i64;

/// Inclusive calendar date range for ledger queries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range is usable only when it does not run backwards
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

/// Raised when a stored label does not name a known enum variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseVariantError {
    pub kind: &'static str,
    pub value: String,
}
