//! Domain models for the Supermarket Management System

mod customer;
mod finance;
mod product;
mod purchase;
mod supplier;

pub use customer::*;
pub use finance::*;
pub use product::*;
pub use purchase::*;
pub use supplier::*;
