//! Business logic services for the FIFO ledger

pub mod ledger;
pub mod product;
pub mod report;

pub use ledger::LedgerService;
pub use product::ProductService;
pub use report::ReportService;
