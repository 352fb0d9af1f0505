//! Selector data for the purchase form

use std::sync::Arc;

use shared::{Customer, Product};

use crate::error::AppResult;
use crate::store::PurchaseStore;

/// Read-only lookups that populate the purchase form
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn PurchaseStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn PurchaseStore>) -> Self {
        Self { store }
    }

    pub async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        self.store.list_customers().await
    }

    /// Products with at least one unit on hand
    pub async fn list_available_products(&self) -> AppResult<Vec<Product>> {
        let products = self.store.list_available_products().await?;
        Ok(products.into_iter().filter(|p| p.is_available()).collect())
    }
}
