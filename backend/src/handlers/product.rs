//! HTTP handlers for product selection

use axum::{extract::State, Json};
use shared::Product;

use crate::error::AppResult;
use crate::services::CatalogService;
use crate::AppState;

/// List products with stock on hand
pub async fn list_available_products(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.store.clone());
    let products = service.list_available_products().await?;
    Ok(Json(products))
}
