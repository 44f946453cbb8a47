//! Profitability report models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals over all selling lots of a product up to a cutoff date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SellingAggregate {
    pub quantity: i64,
    /// Sum of quantity x unit price
    pub revenue: Decimal,
}

/// Profit of a product as of a cutoff date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitReport {
    pub product_name: String,
    pub report_date: NaiveDate,
    pub sold_quantity: i64,
    pub revenue: Decimal,
    pub cost_of_goods_sold: Decimal,
    /// Unrounded profit
    pub profit: Decimal,
    /// Profit rounded half-up to two places
    pub profit_rounded: Decimal,
    pub message: String,
}
