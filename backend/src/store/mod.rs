//! Storage abstraction for the purchase workflow
//!
//! Services depend on these traits rather than on a concrete connection.
//! `PurchaseStore` covers single-statement reads and writes; `PurchaseUnit`
//! is one open database transaction.

use async_trait::async_trait;
use shared::{
    Customer, CustomerId, FinanceEntry, NewFinanceEntry, Product, ProductId, Purchase, SupplierId,
};

use crate::error::AppResult;

pub mod postgres;

pub use postgres::PgStore;

/// Storage handle injected into the services
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Exact-name customer lookup
    async fn find_customer_by_name(&self, name: &str) -> AppResult<Option<Customer>>;

    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>>;

    /// Insert a customer with zero accumulated cost. Returns `None` when a
    /// customer with the same name already exists.
    async fn insert_customer(&self, name: &str, phone_number: &str) -> AppResult<Option<Customer>>;

    async fn list_customers(&self) -> AppResult<Vec<Customer>>;

    /// Products with stock on hand
    async fn list_available_products(&self) -> AppResult<Vec<Product>>;

    /// Snapshot of the whole finance ledger, oldest first
    async fn list_finance_entries(&self) -> AppResult<Vec<FinanceEntry>>;

    /// Open a transaction for one purchase
    async fn begin(&self) -> AppResult<Box<dyn PurchaseUnit>>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> bool;
}

/// One open transaction. Nothing written through it is visible until `commit`.
#[async_trait]
pub trait PurchaseUnit: Send {
    /// Decrement stock only if at least `quantity` units are on hand
    async fn take_stock(&mut self, product_id: ProductId, quantity: i32) -> AppResult<()>;

    async fn insert_purchase(
        &mut self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> AppResult<Purchase>;

    async fn supplier_for_product(&mut self, product_id: ProductId) -> AppResult<Option<SupplierId>>;

    async fn insert_finance_entry(&mut self, entry: &NewFinanceEntry) -> AppResult<FinanceEntry>;

    async fn commit(&mut self) -> AppResult<()>;

    async fn rollback(&mut self) -> AppResult<()>;
}
