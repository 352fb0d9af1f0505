//! Finance ledger models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::PaymentMethod;
use crate::types::{CustomerId, FinanceEntryId, ParseVariantError, SupplierId};

/// Kind of money movement recorded in the ledger
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Sale to a customer (income)
    Purchase,
    /// Stock bought from a supplier (expense)
    Supply,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Purchase => "Purchase",
            TransactionKind::Supply => "Supply",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Purchase" | "purchase" => Ok(TransactionKind::Purchase),
            "Supply" | "supply" => Ok(TransactionKind::Supply),
            other => Err(ParseVariantError {
                kind: "transaction kind",
                value: other.to_string(),
            }),
        }
    }
}

/// An append-only ledger row. Amounts are stored positive; the kind decides
/// whether the row is income or expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceEntry {
    pub id: FinanceEntryId,
    pub kind: TransactionKind,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub supplier_id: SupplierId,
    /// Absent for supply entries
    pub customer_id: Option<CustomerId>,
    pub created_at: DateTime<Utc>,
}

impl FinanceEntry {
    /// Amount as it contributes to profit: income positive, expense negative
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Purchase => self.amount,
            TransactionKind::Supply => -self.amount,
        }
    }
}

/// A ledger row about to be appended
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFinanceEntry {
    pub kind: TransactionKind,
    pub payment_method: PaymentMethod,
    pub amount: Decimal,
    pub supplier_id: SupplierId,
    pub customer_id: Option<CustomerId>,
}

/// Net profit over a date range together with the entries it was computed from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetProfitReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_profit: Decimal,
    pub entries: Vec<FinanceEntry>,
}
