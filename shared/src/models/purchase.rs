//! Purchase (sale) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Customer, FinanceEntry};
use crate::types::{CustomerId, ParseVariantError, ProductId, PurchaseId};

/// A recorded sale of a product quantity to a customer. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Purchase {
    pub id: PurchaseId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

/// Payment methods accepted at the till
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::BankTransfer,
    ];

    /// Label stored in the finance ledger
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseVariantError {
                kind: "payment method",
                value: s.to_string(),
            })
    }
}

/// Which customer a purchase is for, as chosen on the purchase form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CustomerSelection {
    Existing { customer_id: CustomerId },
    New { name: String, phone_number: String },
}

/// Input for the purchase form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePurchaseInput {
    pub customer: CustomerSelection,
    pub product_id: ProductId,
    pub quantity: i32,
    pub payment_method: PaymentMethod,
}

/// Rows written by one successful purchase
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseReceipt {
    pub purchase: Purchase,
    pub finance_entry: FinanceEntry,
}

/// Outcome of the purchase form, including how the customer was resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutReceipt {
    pub customer: Customer,
    pub customer_created: bool,
    #[serde(flatten)]
    pub receipt: PurchaseReceipt,
}
