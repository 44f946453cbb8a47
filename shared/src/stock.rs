//! Stock guard planning
//!
//! Given the balances of the products a batch references, read once at the
//! start of the batch, classify every submitted lot and compute the balances
//! to write back. The backend runs this inside the transaction that holds the
//! row locks, so the plan and the write are atomic with respect to any other
//! batch touching the same products.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{LotInput, LotOutcome, Rejection};
use crate::types::LotKind;
use crate::validation::validate_lot_input;

/// Balance of one product as seen by a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductBalance {
    pub product_id: Uuid,
    pub name: String,
    pub count: i32,
}

/// Balances of the products a batch may touch, keyed by name
#[derive(Debug, Clone, Default)]
pub struct StockSnapshot {
    balances: HashMap<String, ProductBalance>,
}

impl StockSnapshot {
    pub fn new(balances: impl IntoIterator<Item = ProductBalance>) -> Self {
        Self {
            balances: balances
                .into_iter()
                .map(|balance| (balance.name.clone(), balance))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ProductBalance> {
        self.balances.get(name)
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

/// A lot accepted by the planner, ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLot {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub date: NaiveDate,
}

/// Result of planning one batch
#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub kind: LotKind,
    /// One outcome per submitted lot, in submission order
    pub outcomes: Vec<LotOutcome>,
    pub accepted: Vec<PlannedLot>,
    /// Final balance of every product with at least one accepted lot
    pub balances: Vec<ProductBalance>,
}

impl BatchPlan {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.accepted.len()
    }
}

/// Classify every lot of a batch against the snapshot.
///
/// Checks run in order: unknown product, invalid data, then (sellings only)
/// insufficient stock. Accepted lots move the running balance of their
/// product, so later lots in the same batch see the effect of earlier ones.
pub fn plan_batch(kind: LotKind, mut snapshot: StockSnapshot, items: &[LotInput]) -> BatchPlan {
    let mut outcomes = Vec::with_capacity(items.len());
    let mut accepted = Vec::new();
    let mut touched: BTreeSet<String> = BTreeSet::new();

    for item in items {
        let name = item.product_name.as_str();

        let Some(balance) = snapshot.balances.get_mut(name) else {
            outcomes.push(LotOutcome::rejected(kind, name, Rejection::UnknownProduct));
            continue;
        };

        let Ok(lot) = validate_lot_input(item) else {
            outcomes.push(LotOutcome::rejected(kind, name, Rejection::InvalidData));
            continue;
        };

        let next = match kind {
            LotKind::Purchase => balance.count.checked_add(lot.quantity),
            LotKind::Selling => {
                if lot.quantity > balance.count {
                    outcomes.push(LotOutcome::rejected(
                        kind,
                        name,
                        Rejection::InsufficientStock {
                            requested: lot.quantity,
                            available: balance.count,
                        },
                    ));
                    continue;
                }
                Some(balance.count - lot.quantity)
            }
        };

        // Only reachable for a purchase that would overflow the balance
        let Some(next) = next else {
            outcomes.push(LotOutcome::rejected(kind, name, Rejection::InvalidData));
            continue;
        };

        balance.count = next;
        touched.insert(balance.name.clone());
        accepted.push(PlannedLot {
            product_id: balance.product_id,
            product_name: balance.name.clone(),
            quantity: lot.quantity,
            price: lot.price,
            date: lot.date,
        });
        outcomes.push(LotOutcome::accepted(kind, name));
    }

    let balances = touched
        .iter()
        .filter_map(|name| snapshot.balances.get(name).cloned())
        .collect();

    BatchPlan {
        kind,
        outcomes,
        accepted,
        balances,
    }
}
