//! HTTP handlers for the Supermarket Management System API

pub mod customer;
pub mod finance;
pub mod health;
pub mod pricing;
pub mod product;
pub mod purchase;

pub use customer::*;
pub use finance::*;
pub use health::*;
pub use pricing::*;
pub use product::*;
pub use purchase::*;
