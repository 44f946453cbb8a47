//! FIFO cost engine
//!
//! All units sold up to a cutoff date are treated as one pool and matched
//! against the earliest purchase lots up to the same cutoff. This yields the
//! cumulative profit as of the cutoff, not a per-sale margin.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{PurchaseLot, SellingAggregate};
use crate::types::round_money;

/// Failures of the cost engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FifoError {
    #[error("Sold quantity {sold} exceeds purchased quantity {purchased} as of the cutoff date")]
    InconsistentLedger { sold: i64, purchased: i64 },

    #[error("Monetary amount exceeds the supported range")]
    AmountOutOfRange,
}

/// Cost and profit figures for one product and cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FifoBreakdown {
    pub sold_quantity: i64,
    pub revenue: Decimal,
    pub cost_of_goods_sold: Decimal,
    pub profit: Decimal,
}

impl FifoBreakdown {
    pub fn profit_rounded(&self) -> Decimal {
        round_money(self.profit)
    }
}

/// Cost of the first `sold_quantity` units drawn from `lots` in order.
///
/// `lots` must already be sorted by purchase date ascending.
pub fn cost_of_goods_sold(sold_quantity: i64, lots: &[PurchaseLot]) -> Result<Decimal, FifoError> {
    let mut remaining = sold_quantity;
    let mut cost = Decimal::ZERO;

    for lot in lots {
        if remaining <= 0 {
            break;
        }
        let taken = i64::from(lot.quantity).min(remaining);
        cost = Decimal::from(taken)
            .checked_mul(lot.price)
            .and_then(|lot_cost| cost.checked_add(lot_cost))
            .ok_or(FifoError::AmountOutOfRange)?;
        remaining -= taken;
    }

    if remaining > 0 {
        let purchased = lots.iter().map(|lot| i64::from(lot.quantity)).sum();
        return Err(FifoError::InconsistentLedger {
            sold: sold_quantity,
            purchased,
        });
    }

    Ok(cost)
}

/// Profit as of a cutoff, from the selling totals and purchase lots up to it
pub fn compute_profit(
    sold: &SellingAggregate,
    lots: &[PurchaseLot],
) -> Result<FifoBreakdown, FifoError> {
    let cost_of_goods_sold = cost_of_goods_sold(sold.quantity, lots)?;
    let profit = sold
        .revenue
        .checked_sub(cost_of_goods_sold)
        .ok_or(FifoError::AmountOutOfRange)?;

    Ok(FifoBreakdown {
        sold_quantity: sold.quantity,
        revenue: sold.revenue,
        cost_of_goods_sold,
        profit,
    })
}
