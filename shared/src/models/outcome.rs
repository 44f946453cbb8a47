//! Per-item outcomes of a purchase or selling batch

use serde::{Deserialize, Serialize};

use crate::types::LotKind;

/// Classification of a single submitted lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Accepted,
    ValidationError,
    ConflictError,
}

/// Why a lot was not recorded, in the order the checks are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownProduct,
    InvalidData,
    InsufficientStock { requested: i32, available: i32 },
}

impl Rejection {
    pub fn status(&self) -> OutcomeStatus {
        match self {
            Rejection::UnknownProduct | Rejection::InvalidData => OutcomeStatus::ValidationError,
            Rejection::InsufficientStock { .. } => OutcomeStatus::ConflictError,
        }
    }
}

/// Outcome of one lot, reported back in submission order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotOutcome {
    pub status: OutcomeStatus,
    pub product_name: String,
    pub message: String,
}

impl LotOutcome {
    pub fn accepted(kind: LotKind, product_name: &str) -> Self {
        Self {
            status: OutcomeStatus::Accepted,
            product_name: product_name.to_string(),
            message: format!("{} for product [{}] saved.", kind, product_name),
        }
    }

    pub fn rejected(kind: LotKind, product_name: &str, rejection: Rejection) -> Self {
        let message = match rejection {
            Rejection::UnknownProduct => {
                format!("Error: product [{}] does not exist.", product_name)
            }
            Rejection::InvalidData => format!(
                "Error: in product [{}] {} data incorrect: quantity must be > 0, price must be >= 0, \
                 date must be present and have format YYYY-MM-DD.",
                product_name,
                kind.as_str()
            ),
            Rejection::InsufficientStock { requested, available } => format!(
                "Error: in product [{}] insufficient stock: requested {}, available {}.",
                product_name, requested, available
            ),
        };

        Self {
            status: rejection.status(),
            product_name: product_name.to_string(),
            message,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.status == OutcomeStatus::Accepted
    }
}

/// Response to a purchase or selling batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub accepted: usize,
    pub rejected: usize,
    pub outcomes: Vec<LotOutcome>,
}

impl From<Vec<LotOutcome>> for BatchResponse {
    fn from(outcomes: Vec<LotOutcome>) -> Self {
        let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
        Self {
            accepted,
            rejected: outcomes.len() - accepted,
            outcomes,
        }
    }
}
