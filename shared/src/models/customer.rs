//! Customer models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::CustomerId;

/// A customer of the supermarket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    /// Unique business key used to recognise returning customers
    pub name: String,
    pub phone_number: String,
    /// Accumulated spend, maintained outside the purchase workflow
    pub cost: Decimal,
}

/// Fields captured by the "new customer" form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct NewCustomer {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
}

impl NewCustomer {
    /// Build from raw form input, trimming surrounding whitespace
    pub fn new(name: &str, phone_number: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone_number: phone_number.trim().to_string(),
        }
    }
}

/// Result of resolving a customer by name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnsuredCustomer {
    pub customer: Customer,
    /// False when a customer with this name already existed
    pub created: bool,
}
