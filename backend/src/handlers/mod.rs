//! HTTP handlers for the FIFO ledger API

pub mod health;
pub mod ledger;
pub mod product;
pub mod report;

pub use health::*;
pub use ledger::*;
pub use product::*;
pub use report::*;
