//! Shared types and pure ledger logic for the FIFO inventory ledger
//!
//! This crate contains the domain models, input validation, the stock guard
//! planner and the FIFO cost engine. Nothing in here performs I/O; the backend
//! feeds it rows read inside a database transaction.

pub mod fifo;
pub mod models;
pub mod stock;
pub mod types;
pub mod validation;

pub use fifo::*;
pub use models::*;
pub use stock::*;
pub use types::*;
pub use validation::*;
