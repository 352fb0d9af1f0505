//! In-memory storage used by the integration tests

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    Customer, CustomerId, FinanceEntry, NewFinanceEntry, PaymentMethod, Product, ProductId,
    Purchase, Supplier, SupplierId, TransactionKind,
};
use sms_backend::{
    config::{Config, DatabaseConfig, PricingConfig, ServerConfig},
    error::{AppError, AppResult},
    store::{PurchaseStore, PurchaseUnit},
    AppState,
};

/// Rows of every table the purchase workflow touches
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    pub purchases: Vec<Purchase>,
    pub finance_entries: Vec<FinanceEntry>,
}

impl Tables {
    fn product_mut(&mut self, product_id: ProductId) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == product_id)
    }
}

fn next_customer_id(tables: &Tables) -> CustomerId {
    tables.customers.iter().map(|c| c.id).max().unwrap_or(0) + 1
}

fn driver_error(message: String) -> AppError {
    AppError::DatabaseError(sqlx::Error::Protocol(message))
}

/// Store that keeps tables in memory. A unit works on a private copy and
/// publishes it on commit.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    fail_finance_insert: Arc<AtomicBool>,
    begins: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
    rival_customer: Arc<Mutex<Option<(String, String)>>>,
}

impl MemoryStore {
    pub fn new(tables: Tables) -> Self {
        Self {
            tables: Arc::new(Mutex::new(tables)),
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> Tables {
        self.tables.lock().unwrap().clone()
    }

    /// Make every finance insert fail with a driver error
    pub fn fail_finance_inserts(&self) {
        self.fail_finance_insert.store(true, Ordering::SeqCst);
    }

    /// Have another writer insert this customer just before the next
    /// `insert_customer`, after the caller's name lookup has missed
    pub fn insert_rival_customer(&self, name: &str, phone_number: &str) {
        *self.rival_customer.lock().unwrap() = Some((name.to_string(), phone_number.to_string()));
    }

    pub fn transactions_started(&self) -> usize {
        self.begins.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }

    pub fn stock_of(&self, product_id: ProductId) -> i32 {
        self.snapshot()
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.quantity)
            .unwrap_or_default()
    }
}

#[async_trait]
impl PurchaseStore for MemoryStore {
    async fn find_customer_by_name(&self, name: &str) -> AppResult<Option<Customer>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.customers.iter().find(|c| c.name == name).cloned())
    }

    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.customers.iter().find(|c| c.id == customer_id).cloned())
    }

    async fn insert_customer(&self, name: &str, phone_number: &str) -> AppResult<Option<Customer>> {
        let mut tables = self.tables.lock().unwrap();
        if let Some((rival_name, rival_phone)) = self.rival_customer.lock().unwrap().take() {
            let id = next_customer_id(&tables);
            tables.customers.push(Customer {
                id,
                name: rival_name,
                phone_number: rival_phone,
                cost: Decimal::ZERO,
            });
        }
        if tables.customers.iter().any(|c| c.name == name) {
            return Ok(None);
        }
        let customer = Customer {
            id: next_customer_id(&tables),
            name: name.to_string(),
            phone_number: phone_number.to_string(),
            cost: Decimal::ZERO,
        };
        tables.customers.push(customer.clone());
        Ok(Some(customer))
    }

    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        Ok(self.tables.lock().unwrap().customers.clone())
    }

    async fn list_available_products(&self) -> AppResult<Vec<Product>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.products.iter().filter(|p| p.quantity > 0).cloned().collect())
    }

    async fn list_finance_entries(&self) -> AppResult<Vec<FinanceEntry>> {
        let mut entries = self.tables.lock().unwrap().finance_entries.clone();
        entries.sort_by_key(|e| (e.created_at, e.id));
        Ok(entries)
    }

    async fn begin(&self) -> AppResult<Box<dyn PurchaseUnit>> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        let staged = self.snapshot();
        Ok(Box::new(MemoryUnit {
            store: self.clone(),
            staged: Some(staged),
        }))
    }

    async fn ping(&self) -> bool {
        true
    }
}

pub struct MemoryUnit {
    store: MemoryStore,
    staged: Option<Tables>,
}

impl MemoryUnit {
    fn staged(&mut self) -> AppResult<&mut Tables> {
        self.staged
            .as_mut()
            .ok_or_else(|| AppError::Persistence("transaction already finished".to_string()))
    }
}

#[async_trait]
impl PurchaseUnit for MemoryUnit {
    async fn take_stock(&mut self, product_id: ProductId, quantity: i32) -> AppResult<()> {
        let tables = self.staged()?;
        match tables.product_mut(product_id) {
            Some(product) if product.quantity >= quantity => {
                product.quantity -= quantity;
                Ok(())
            }
            _ => Err(AppError::InsufficientStock(format!(
                "product {} does not have {} units available",
                product_id, quantity
            ))),
        }
    }

    async fn insert_purchase(
        &mut self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> AppResult<Purchase> {
        let tables = self.staged()?;
        if !tables.customers.iter().any(|c| c.id == customer_id) {
            return Err(driver_error(format!(
                "purchases_customer_id_fkey violated by customer {}",
                customer_id
            )));
        }
        let purchase = Purchase {
            id: tables.purchases.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            customer_id,
            product_id,
            quantity,
            created_at: Utc::now(),
        };
        tables.purchases.push(purchase.clone());
        Ok(purchase)
    }

    async fn supplier_for_product(&mut self, product_id: ProductId) -> AppResult<Option<SupplierId>> {
        let tables = self.staged()?;
        Ok(tables
            .suppliers
            .iter()
            .filter(|s| s.product_id == product_id)
            .map(|s| s.id)
            .min())
    }

    async fn insert_finance_entry(&mut self, entry: &NewFinanceEntry) -> AppResult<FinanceEntry> {
        if self.store.fail_finance_insert.load(Ordering::SeqCst) {
            return Err(driver_error("finance_entries insert rejected".to_string()));
        }
        let tables = self.staged()?;
        let posted = FinanceEntry {
            id: tables.finance_entries.iter().map(|e| e.id).max().unwrap_or(0) + 1,
            kind: entry.kind,
            payment_method: entry.payment_method,
            amount: entry.amount,
            supplier_id: entry.supplier_id,
            customer_id: entry.customer_id,
            created_at: Utc::now(),
        };
        tables.finance_entries.push(posted.clone());
        Ok(posted)
    }

    async fn commit(&mut self) -> AppResult<()> {
        let staged = self
            .staged
            .take()
            .ok_or_else(|| AppError::Persistence("transaction already finished".to_string()))?;
        *self.store.tables.lock().unwrap() = staged;
        Ok(())
    }

    async fn rollback(&mut self) -> AppResult<()> {
        if self.staged.take().is_some() {
            self.store.rollbacks.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Customer 7; product 3 supplied by 12; product 5 without a supplier;
/// product 8 with one unit left, supplied by 13
pub fn seeded_tables() -> Tables {
    Tables {
        customers: vec![Customer {
            id: 7,
            name: "Ravi Kumar".to_string(),
            phone_number: "9876543210".to_string(),
            cost: Decimal::ZERO,
        }],
        products: vec![
            product(3, "Basmati Rice", 20),
            product(5, "Ghee", 10),
            product(8, "Saffron", 1),
            product(9, "Cardamom", 0),
        ],
        suppliers: vec![supplier(12, 3), supplier(13, 8)],
        purchases: vec![],
        finance_entries: vec![],
    }
}

pub fn seeded_store() -> MemoryStore {
    MemoryStore::new(seeded_tables())
}

pub fn product(id: ProductId, name: &str, quantity: i32) -> Product {
    Product {
        id,
        name: name.to_string(),
        quantity,
    }
}

pub fn supplier(id: SupplierId, product_id: ProductId) -> Supplier {
    Supplier {
        id,
        product_id,
        name: format!("Supplier {}", id),
        unit_cost: Decimal::from(30),
    }
}

pub fn ledger_entry(id: i64, kind: TransactionKind, amount: i64, at: &str) -> FinanceEntry {
    FinanceEntry {
        id,
        kind,
        payment_method: PaymentMethod::Cash,
        amount: Decimal::from(amount),
        supplier_id: 12,
        customer_id: match kind {
            TransactionKind::Purchase => Some(7),
            TransactionKind::Supply => None,
        },
        created_at: DateTime::parse_from_rfc3339(at).unwrap().with_timezone(&Utc),
    }
}

pub fn test_config(unit_price: Decimal) -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "postgres://localhost/sms_test".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        pricing: PricingConfig { unit_price },
    }
}

pub fn app_state(store: MemoryStore) -> AppState {
    AppState::new(Arc::new(store), test_config(shared::DEFAULT_UNIT_PRICE))
}
