//! Ledger poster: appends finance entries inside an open purchase unit

use rust_decimal::Decimal;
use shared::{
    purchase_amount, CustomerId, FinanceEntry, NewFinanceEntry, PaymentMethod, Purchase,
    SupplierId, TransactionKind,
};

use crate::error::{AppError, AppResult};
use crate::store::PurchaseUnit;

/// Posts finance entries. Append-only: it never updates or deletes.
#[derive(Debug, Clone, Copy)]
pub struct LedgerPoster {
    unit_price: Decimal,
}

impl LedgerPoster {
    /// Create a poster charging `unit_price` per unit sold
    pub fn new(unit_price: Decimal) -> Self {
        Self { unit_price }
    }

    /// Amount charged for a sale of `quantity` units
    pub fn amount_for(&self, quantity: i32) -> AppResult<Decimal> {
        purchase_amount(quantity, self.unit_price).ok_or_else(|| {
            AppError::validation("quantity", "Purchase amount exceeds what the ledger can record")
        })
    }

    /// Append one ledger row and return its id
    pub async fn post(
        &self,
        unit: &mut dyn PurchaseUnit,
        kind: TransactionKind,
        payment_method: PaymentMethod,
        amount: Decimal,
        supplier_id: SupplierId,
        customer_id: Option<CustomerId>,
    ) -> AppResult<FinanceEntry> {
        if amount < Decimal::ZERO {
            return Err(AppError::validation(
                "amount",
                "Ledger amounts are stored positive; the kind carries the sign",
            ));
        }

        let entry = NewFinanceEntry {
            kind,
            payment_method,
            amount,
            supplier_id,
            customer_id,
        };

        let posted = unit.insert_finance_entry(&entry).await?;
        tracing::debug!(
            finance_id = posted.id,
            kind = %kind,
            amount = %amount,
            "Posted finance entry"
        );

        Ok(posted)
    }

    /// Post the income entry for a purchase just inserted in `unit`.
    ///
    /// The supplier is whoever supplies the purchased product; a product with
    /// no supplier fails the whole unit.
    pub async fn post_purchase(
        &self,
        unit: &mut dyn PurchaseUnit,
        purchase: &Purchase,
        payment_method: PaymentMethod,
    ) -> AppResult<FinanceEntry> {
        let supplier_id = unit
            .supplier_for_product(purchase.product_id)
            .await?
            .ok_or_else(|| {
                AppError::Persistence(format!("no supplier for product {}", purchase.product_id))
            })?;

        self.post(
            unit,
            TransactionKind::Purchase,
            payment_method,
            self.amount_for(purchase.quantity)?,
            supplier_id,
            Some(purchase.customer_id),
        )
        .await
    }
}
