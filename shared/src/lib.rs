//! Shared types and models for the Supermarket Management System
//!
//! This crate contains the IO-free domain shared between the backend and the
//! dashboard (via WASM): records, pricing, validation and the net profit
//! aggregation over the finance ledger.

pub mod ledger;
pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use ledger::*;
pub use models::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;
