//! Business logic services for the Supermarket Management System

pub mod catalog;
pub mod finance;
pub mod ledger;
pub mod purchase;

pub use catalog::CatalogService;
pub use finance::FinanceService;
pub use ledger::LedgerPoster;
pub use purchase::PurchaseService;
