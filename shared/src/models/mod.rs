//! Domain models for the FIFO inventory ledger

mod lot;
mod outcome;
mod product;
mod report;

pub use lot::*;
pub use outcome::*;
pub use product::*;
pub use report::*;
