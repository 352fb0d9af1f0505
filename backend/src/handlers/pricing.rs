//! Pricing lookup for the purchase form's amount preview

use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct PricingResponse {
    pub unit_price: Decimal,
}

/// Unit price the ledger poster charges
pub async fn get_pricing(State(state): State<AppState>) -> Json<PricingResponse> {
    Json(PricingResponse {
        unit_price: state.config.pricing.unit_price,
    })
}
