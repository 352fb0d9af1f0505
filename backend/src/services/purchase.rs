//! Purchase orchestration: customer resolution and the atomic
//! purchase-plus-ledger transaction

use std::sync::Arc;

use shared::{
    validate_new_customer, validate_quantity, CheckoutReceipt, CreatePurchaseInput,
    CustomerId, CustomerSelection, EnsuredCustomer, NewCustomer, PaymentMethod, ProductId,
    PurchaseReceipt,
};

use crate::error::{AppError, AppResult};
use crate::services::LedgerPoster;
use crate::store::{PurchaseStore, PurchaseUnit};

/// Purchase service for recording sales
#[derive(Clone)]
pub struct PurchaseService {
    store: Arc<dyn PurchaseStore>,
    ledger: LedgerPoster,
}

impl PurchaseService {
    /// Create a new PurchaseService instance
    pub fn new(store: Arc<dyn PurchaseStore>, ledger: LedgerPoster) -> Self {
        Self { store, ledger }
    }

    /// Return the customer with this exact name, creating it with zero
    /// accumulated cost if there is none. Existing customers are not modified.
    pub async fn ensure_customer(&self, name: &str, phone_number: &str) -> AppResult<EnsuredCustomer> {
        let input = NewCustomer::new(name, phone_number);
        validate_new_customer(&input).map_err(|msg| AppError::validation("customer", msg))?;

        if let Some(customer) = self.store.find_customer_by_name(&input.name).await? {
            return Ok(EnsuredCustomer {
                customer,
                created: false,
            });
        }

        match self.store.insert_customer(&input.name, &input.phone_number).await? {
            Some(customer) => {
                tracing::info!(customer_id = customer.id, "Created customer");
                Ok(EnsuredCustomer {
                    customer,
                    created: true,
                })
            }
            None => {
                // A concurrent request inserted the same name first
                let customer = self
                    .store
                    .find_customer_by_name(&input.name)
                    .await?
                    .ok_or_else(|| {
                        AppError::Persistence(format!("customer {:?} vanished after insert conflict", input.name))
                    })?;
                Ok(EnsuredCustomer {
                    customer,
                    created: false,
                })
            }
        }
    }

    /// Record a sale and its ledger entry as one atomic unit.
    ///
    /// Stock is taken, the purchase inserted and the finance entry posted in a
    /// single transaction. Any failure rolls all of it back.
    pub async fn record_purchase(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
        payment_method: PaymentMethod,
    ) -> AppResult<PurchaseReceipt> {
        validate_quantity(quantity, None).map_err(|msg| AppError::validation("quantity", msg))?;

        let mut unit = self.store.begin().await.map_err(AppError::into_persistence)?;

        let written = self
            .write_purchase(unit.as_mut(), customer_id, product_id, quantity, payment_method)
            .await;

        match written {
            Ok(receipt) => {
                unit.commit().await.map_err(AppError::into_persistence)?;
                tracing::info!(
                    purchase_id = receipt.purchase.id,
                    finance_id = receipt.finance_entry.id,
                    amount = %receipt.finance_entry.amount,
                    "Recorded purchase"
                );
                Ok(receipt)
            }
            Err(err) => {
                if let Err(rollback_err) = unit.rollback().await {
                    tracing::error!(error = %rollback_err, "Rollback failed");
                }
                tracing::error!(
                    customer_id,
                    product_id,
                    quantity,
                    payment_method = %payment_method,
                    error = %err,
                    "Error in record_purchase, rolled back"
                );
                Err(err.into_persistence())
            }
        }
    }

    /// The purchase form: resolve the customer, then record the purchase.
    ///
    /// A new customer is committed before the purchase starts and is kept
    /// even if the purchase then fails.
    pub async fn checkout(&self, input: CreatePurchaseInput) -> AppResult<CheckoutReceipt> {
        validate_quantity(input.quantity, None)
            .map_err(|msg| AppError::validation("quantity", msg))?;

        let (customer, customer_created) = match input.customer {
            CustomerSelection::Existing { customer_id } => {
                let customer = self
                    .store
                    .find_customer(customer_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Customer {}", customer_id)))?;
                (customer, false)
            }
            CustomerSelection::New { name, phone_number } => {
                let ensured = self.ensure_customer(&name, &phone_number).await?;
                (ensured.customer, ensured.created)
            }
        };

        let receipt = self
            .record_purchase(customer.id, input.product_id, input.quantity, input.payment_method)
            .await?;

        Ok(CheckoutReceipt {
            customer,
            customer_created,
            receipt,
        })
    }

    async fn write_purchase(
        &self,
        unit: &mut dyn PurchaseUnit,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
        payment_method: PaymentMethod,
    ) -> AppResult<PurchaseReceipt> {
        unit.take_stock(product_id, quantity).await?;
        let purchase = unit.insert_purchase(customer_id, product_id, quantity).await?;
        let finance_entry = self.ledger.post_purchase(unit, &purchase, payment_method).await?;

        Ok(PurchaseReceipt {
            purchase,
            finance_entry,
        })
    }
}
