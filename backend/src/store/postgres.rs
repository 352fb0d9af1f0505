//! PostgreSQL implementation of the storage traits

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::{
    Customer, CustomerId, FinanceEntry, NewFinanceEntry, Product, ProductId, Purchase, SupplierId,
};
use sqlx::{FromRow, PgPool, Postgres, Transaction};

use super::{PurchaseStore, PurchaseUnit};
use crate::error::{AppError, AppResult};

/// Postgres-backed storage handle
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Row for customer queries
#[derive(Debug, FromRow)]
struct CustomerRow {
    customer_id: i64,
    name: String,
    phone_number: String,
    cost: Decimal,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.customer_id,
            name: row.name,
            phone_number: row.phone_number,
            cost: row.cost,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    product_id: i64,
    product_name: String,
    quantity: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.product_id,
            name: row.product_name,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, FromRow)]
struct PurchaseRow {
    purchase_id: i64,
    customer_id: i64,
    product_id: i64,
    quantity: i32,
    purchase_date: DateTime<Utc>,
}

impl From<PurchaseRow> for Purchase {
    fn from(row: PurchaseRow) -> Self {
        Purchase {
            id: row.purchase_id,
            customer_id: row.customer_id,
            product_id: row.product_id,
            quantity: row.quantity,
            created_at: row.purchase_date,
        }
    }
}

/// Row for finance ledger queries; kind and payment method are stored as labels
#[derive(Debug, FromRow)]
struct FinanceRow {
    finance_id: i64,
    transaction_type: String,
    payment_method: String,
    amount: Decimal,
    supplier_id: i64,
    customer_id: Option<i64>,
    transaction_date: DateTime<Utc>,
}

impl TryFrom<FinanceRow> for FinanceEntry {
    type Error = AppError;

    fn try_from(row: FinanceRow) -> Result<Self, Self::Error> {
        Ok(FinanceEntry {
            id: row.finance_id,
            kind: row
                .transaction_type
                .parse()
                .map_err(|e| AppError::Internal(format!("finance row {}: {}", row.finance_id, e)))?,
            payment_method: row
                .payment_method
                .parse()
                .map_err(|e| AppError::Internal(format!("finance row {}: {}", row.finance_id, e)))?,
            amount: row.amount,
            supplier_id: row.supplier_id,
            customer_id: row.customer_id,
            created_at: row.transaction_date,
        })
    }
}

#[async_trait]
impl PurchaseStore for PgStore {
    async fn find_customer_by_name(&self, name: &str) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT customer_id, name, phone_number, cost FROM customers WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn find_customer(&self, customer_id: CustomerId) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT customer_id, name, phone_number, cost FROM customers WHERE customer_id = $1",
        )
        .bind(customer_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn insert_customer(&self, name: &str, phone_number: &str) -> AppResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (name, phone_number, cost)
            VALUES ($1, $2, 0.00)
            ON CONFLICT (name) DO NOTHING
            RETURNING customer_id, name, phone_number, cost
            "#,
        )
        .bind(name)
        .bind(phone_number)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT customer_id, name, phone_number, cost FROM customers ORDER BY customer_id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn list_available_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT product_id, product_name, quantity
            FROM supermarket_products
            WHERE quantity > 0
            ORDER BY product_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn list_finance_entries(&self) -> AppResult<Vec<FinanceEntry>> {
        let rows = sqlx::query_as::<_, FinanceRow>(
            r#"
            SELECT finance_id, transaction_type, payment_method, amount,
                   supplier_id, customer_id, transaction_date
            FROM finance_entries
            ORDER BY transaction_date, finance_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(FinanceEntry::try_from).collect()
    }

    async fn begin(&self) -> AppResult<Box<dyn PurchaseUnit>> {
        let tx = self.db.begin().await?;
        Ok(Box::new(PgPurchaseUnit { tx: Some(tx) }))
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db).await.is_ok()
    }
}

/// One Postgres transaction. Dropping it without `commit` rolls back.
pub struct PgPurchaseUnit {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgPurchaseUnit {
    fn tx(&mut self) -> AppResult<&mut Transaction<'static, Postgres>> {
        self.tx
            .as_mut()
            .ok_or_else(|| AppError::Persistence("transaction already finished".to_string()))
    }
}

#[async_trait]
impl PurchaseUnit for PgPurchaseUnit {
    async fn take_stock(&mut self, product_id: ProductId, quantity: i32) -> AppResult<()> {
        let tx = self.tx()?;
        let result = sqlx::query(
            r#"
            UPDATE supermarket_products
            SET quantity = quantity - $1
            WHERE product_id = $2 AND quantity >= $1
            "#,
        )
        .bind(quantity)
        .bind(product_id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::InsufficientStock(format!(
                "product {} does not have {} units available",
                product_id, quantity
            )));
        }

        Ok(())
    }

    async fn insert_purchase(
        &mut self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> AppResult<Purchase> {
        let tx = self.tx()?;
        let row = sqlx::query_as::<_, PurchaseRow>(
            r#"
            INSERT INTO purchases (customer_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING purchase_id, customer_id, product_id, quantity, purchase_date
            "#,
        )
        .bind(customer_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row.into())
    }

    async fn supplier_for_product(&mut self, product_id: ProductId) -> AppResult<Option<SupplierId>> {
        let tx = self.tx()?;
        let supplier_id = sqlx::query_scalar::<_, i64>(
            "SELECT supplier_id FROM suppliers WHERE product_id = $1 ORDER BY supplier_id LIMIT 1",
        )
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(supplier_id)
    }

    async fn insert_finance_entry(&mut self, entry: &NewFinanceEntry) -> AppResult<FinanceEntry> {
        let tx = self.tx()?;
        let row = sqlx::query_as::<_, FinanceRow>(
            r#"
            INSERT INTO finance_entries (transaction_type, payment_method, amount, supplier_id, customer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING finance_id, transaction_type, payment_method, amount,
                      supplier_id, customer_id, transaction_date
            "#,
        )
        .bind(entry.kind.as_str())
        .bind(entry.payment_method.as_str())
        .bind(entry.amount)
        .bind(entry.supplier_id)
        .bind(entry.customer_id)
        .fetch_one(&mut **tx)
        .await?;

        row.try_into()
    }

    async fn commit(&mut self) -> AppResult<()> {
        match self.tx.take() {
            Some(tx) => Ok(tx.commit().await?),
            None => Err(AppError::Persistence("transaction already finished".to_string())),
        }
    }

    async fn rollback(&mut self) -> AppResult<()> {
        match self.tx.take() {
            Some(tx) => Ok(tx.rollback().await?),
            None => Ok(()),
        }
    }
}
