//! Sale pricing
//!
//! Sales are charged at a flat rate per unit, independent of what the
//! supplier charges for the product.

use rust_decimal::Decimal;

/// Flat selling price per unit (50.00)
pub const DEFAULT_UNIT_PRICE: Decimal = Decimal::from_parts(5000, 0, 0, false, 2);

/// Largest amount a ledger row can hold (NUMERIC(12, 2))
pub const MAX_LEDGER_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Amount charged for `quantity` units at `unit_price`, rounded to cents.
/// `None` when the amount would not fit a ledger row.
pub fn purchase_amount(quantity: i32, unit_price: Decimal) -> Option<Decimal> {
    Decimal::from(quantity)
        .checked_mul(unit_price)
        .map(|amount| amount.round_dp(2))
        .filter(|amount| amount.abs() <= MAX_LEDGER_AMOUNT)
}
