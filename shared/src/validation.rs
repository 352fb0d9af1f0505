//! Validation utilities for the Supermarket Management System
//!
//! Form inputs are checked here before anything reaches storage.

use validator::Validate;

use crate::models::NewCustomer;
use crate::types::DateRange;

// ============================================================================
// Purchase Validations
// ============================================================================

/// Validate a requested purchase quantity.
///
/// `available` is the stock the form displayed, when known. The authoritative
/// check happens again when stock is taken inside the purchase transaction.
pub fn validate_quantity(quantity: i32, available: Option<i32>) -> Result<(), &'static str> {
    if quantity < 1 {
        return Err("Quantity must be at least 1");
    }
    if let Some(available) = available {
        if quantity > available {
            return Err("Quantity exceeds available stock");
        }
    }
    Ok(())
}

// ============================================================================
// Customer Validations
// ============================================================================

/// Validate the "new customer" form fields. Both must be non-empty after
/// trimming; the phone number is otherwise free text.
pub fn validate_new_customer(customer: &NewCustomer) -> Result<(), &'static str> {
    customer
        .validate()
        .map_err(|_| "Please enter customer name and phone number")
}

// ============================================================================
// Report Validations
// ============================================================================

/// Validate a report date range
pub fn validate_date_range(range: &DateRange) -> Result<(), &'static str> {
    if !range.is_ordered() {
        return Err("Start date must not be after end date");
    }
    Ok(())
}
