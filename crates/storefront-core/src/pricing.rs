//! Price Conversion
//!
//! Payment APIs take integer minor units (cents). Conversion rounds half up
//! so fractional cents are never silently dropped.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, StorefrontError};

/// Minor units per major unit for USD
const CENTS_PER_DOLLAR: i64 = 100;

/// Convert a USD price to cents, rounding half away from zero.
///
/// Negative prices are rejected. The result is always `>= 0`.
pub fn to_minor_units(price: Decimal) -> Result<i64> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(StorefrontError::NegativePrice(price));
    }

    price
        .checked_mul(Decimal::from(CENTS_PER_DOLLAR))
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .ok_or(StorefrontError::PriceOverflow(price))
}

/// Like [`to_minor_units`], but a price that rounds to zero is an error.
pub fn chargeable_minor_units(price: Decimal) -> Result<i64> {
    match to_minor_units(price)? {
        0 => Err(StorefrontError::PriceTooSmall(price)),
        cents => Ok(cents),
    }
}
