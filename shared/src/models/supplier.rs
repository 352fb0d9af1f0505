//! Supplier models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{ProductId, SupplierId};

/// A supplier; each product is supplied by exactly one supplier record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: SupplierId,
    pub product_id: ProductId,
    pub name: String,
    pub unit_cost: Decimal,
}
