//! HTTP handlers for the purchase form

use axum::{extract::State, http::StatusCode, Json};
use shared::{CheckoutReceipt, CreatePurchaseInput};

use crate::error::AppResult;
use crate::AppState;

/// Create a purchase for an existing or new customer
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(input): Json<CreatePurchaseInput>,
) -> AppResult<(StatusCode, Json<CheckoutReceipt>)> {
    let service = state.purchase_service();
    let receipt = service.checkout(input).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
