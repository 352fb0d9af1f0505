//! Route definitions for the Supermarket Management System

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/customers", customer_routes())
        .nest("/products", product_routes())
        .route("/pricing", get(handlers::get_pricing))
        .route("/purchases", post(handlers::create_purchase))
        .nest("/finance", finance_routes())
}

/// Customer selection routes
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_customers))
        .route("/ensure", post(handlers::ensure_customer))
}

/// Product selection routes
fn product_routes() -> Router<AppState> {
    Router::new().route("/available", get(handlers::list_available_products))
}

/// Finance reporting routes
fn finance_routes() -> Router<AppState> {
    Router::new().route("/net-profit", get(handlers::get_net_profit))
}
