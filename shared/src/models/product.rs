//! Supermarket stock models

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product on the supermarket floor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Units on hand
    pub quantity: i32,
}

impl Product {
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}
