//! Validation utilities for the FIFO inventory ledger

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::models::LotInput;

/// Wire format for every date the ledger accepts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A lot whose quantity, price and date passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidLot {
    pub quantity: i32,
    pub price: Decimal,
    pub date: NaiveDate,
}

/// Validate a product name (non-empty, no surrounding whitespace)
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Product name must not be empty");
    }
    if trimmed.len() != name.len() {
        return Err("Product name must not start or end with whitespace");
    }
    Ok(())
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_ledger_date(value: &str) -> Result<NaiveDate, &'static str> {
    // chrono accepts unpadded fields, the wire format does not
    if value.len() != 10 {
        return Err("Date must have format: YYYY-MM-DD");
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| "Date must have format: YYYY-MM-DD")
}

/// Parse a lot quantity: a positive whole number that fits the balance type
pub fn parse_quantity(value: Option<&Value>) -> Result<i32, &'static str> {
    let value = value.ok_or("Quantity is required")?;
    let quantity = match value.as_i64() {
        Some(quantity) => quantity,
        None if value.as_u64().is_some() => return Err("Quantity is too large"),
        None => return Err("Quantity must be a whole number"),
    };
    if quantity <= 0 {
        return Err("Quantity must be greater than zero");
    }
    i32::try_from(quantity).map_err(|_| "Quantity is too large")
}

/// Parse a unit price given as a JSON number or a decimal string
pub fn parse_price(value: Option<&Value>) -> Result<Decimal, &'static str> {
    let text = match value.ok_or("Price is required")? {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        _ => return Err("Price must be a decimal number"),
    };
    // Large or tiny JSON floats print in exponent form
    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| "Price must be a decimal number")?;
    if price < Decimal::ZERO {
        return Err("Price cannot be negative");
    }
    Ok(price)
}

/// Validate the quantity, price and date of a submitted lot
pub fn validate_lot_input(input: &LotInput) -> Result<ValidLot, &'static str> {
    let quantity = parse_quantity(input.quantity.as_ref())?;
    let price = parse_price(input.price.as_ref())?;

    let date = input.date.as_deref().ok_or("Date is required")?;
    let date = parse_ledger_date(date)?;

    Ok(ValidLot {
        quantity,
        price,
        date,
    })
}
