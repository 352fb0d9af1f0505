//! WebAssembly module for the Supermarket Management System
//!
//! Provides client-side computation for:
//! - Purchase amount preview
//! - Net profit over a date range
//! - Purchase form validation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::ledger::*;
pub use shared::models::*;
pub use shared::pricing::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(concat!(
        "sms-wasm ",
        env!("CARGO_PKG_VERSION"),
        " loaded"
    )));
}

/// Amount a purchase of `quantity` units will post, as a decimal string.
/// `unit_price` is the price served by `GET /api/v1/pricing`.
#[wasm_bindgen]
pub fn calculate_purchase_amount(quantity: i32, unit_price: &str) -> Result<String, JsValue> {
    let price: Decimal = unit_price
        .trim()
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Invalid unit price {:?}: {}", unit_price, e)))?;
    purchase_amount(quantity, price)
        .map(|amount| amount.to_string())
        .ok_or_else(|| JsValue::from_str("Purchase amount is out of range"))
}

/// Net profit over `[start_date, end_date]` for a JSON array of finance entries.
/// Dates are `YYYY-MM-DD`; the result is a decimal string.
#[wasm_bindgen]
pub fn calculate_net_profit(entries_json: &str, start_date: &str, end_date: &str) -> Result<String, JsValue> {
    let entries: Vec<FinanceEntry> = serde_json::from_str(entries_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid entries JSON: {}", e)))?;
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    let (net_profit, _) = compute_net_profit(&entries, start, end);
    Ok(net_profit.to_string())
}

/// Check the "new customer" fields before submitting
#[wasm_bindgen]
pub fn validate_customer_fields(name: &str, phone_number: &str) -> bool {
    validate_new_customer(&NewCustomer::new(name, phone_number)).is_ok()
}

/// Check a quantity against the stock shown on the form
#[wasm_bindgen]
pub fn validate_purchase_quantity(quantity: i32, available: i32) -> bool {
    validate_quantity(quantity, Some(available)).is_ok()
}

fn parse_date(value: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date {:?}: {}", value, e)))
}
