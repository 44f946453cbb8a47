//! Common types used across the ledger

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places used when presenting money
pub const MONEY_SCALE: u32 = 2;

/// Which side of the ledger a lot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotKind {
    Purchase,
    Selling,
}

impl LotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotKind::Purchase => "purchase",
            LotKind::Selling => "selling",
        }
    }

    /// Name of the request field that carries a batch of this kind
    pub fn batch_field(&self) -> &'static str {
        match self {
            LotKind::Purchase => "purchases",
            LotKind::Selling => "sellings",
        }
    }
}

impl std::fmt::Display for LotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotKind::Purchase => write!(f, "Purchase"),
            LotKind::Selling => write!(f, "Selling"),
        }
    }
}

/// Round a monetary amount for presentation (half-up, exactly two places).
///
/// Only ever applied to final figures; accumulation stays unrounded.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}
