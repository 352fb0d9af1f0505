//! HTTP handlers for customer selection

use axum::{extract::State, Json};
use shared::{Customer, EnsuredCustomer, NewCustomer};

use crate::error::AppResult;
use crate::services::CatalogService;
use crate::AppState;

/// List customers for the purchase form selector
pub async fn list_customers(State(state): State<AppState>) -> AppResult<Json<Vec<Customer>>> {
    let service = CatalogService::new(state.store.clone());
    let customers = service.list_customers().await?;
    Ok(Json(customers))
}

/// Find a customer by name, creating it when absent
pub async fn ensure_customer(
    State(state): State<AppState>,
    Json(input): Json<NewCustomer>,
) -> AppResult<Json<EnsuredCustomer>> {
    let service = state.purchase_service();
    let ensured = service
        .ensure_customer(&input.name, &input.phone_number)
        .await?;
    Ok(Json(ensured))
}
