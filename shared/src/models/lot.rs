//! Purchase and selling lot models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Inventory received into stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurchaseLot {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price
    pub price: Decimal,
    pub purchase_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Inventory disposed from stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SellingLot {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Unit price
    pub price: Decimal,
    pub selling_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// One submitted lot, as received from a client.
///
/// Quantity and price are kept as raw JSON so that a malformed value rejects
/// only its own lot. Checked per item by
/// [`crate::validation::validate_lot_input`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotInput {
    pub product_name: String,
    #[serde(default)]
    pub quantity: Option<Value>,
    /// Unit price, as a JSON number or a decimal string
    #[serde(default)]
    pub price: Option<Value>,
    /// Date in `YYYY-MM-DD` form
    #[serde(default)]
    pub date: Option<String>,
}

impl LotInput {
    pub fn new(
        product_name: impl Into<String>,
        quantity: i64,
        price: Decimal,
        date: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            quantity: Some(Value::from(quantity)),
            price: Some(Value::String(price.to_string())),
            date: Some(date.into()),
        }
    }
}

/// Batch of purchases
#[derive(Debug, Clone, Deserialize)]
pub struct PurchasesRequest {
    #[serde(default)]
    pub purchases: Vec<LotInput>,
}

/// Batch of sellings
#[derive(Debug, Clone, Deserialize)]
pub struct SellingsRequest {
    #[serde(default)]
    pub sellings: Vec<LotInput>,
}
