//! Cart pricing.
//!
//! One quote function used everywhere a total is shown or charged. The
//! checkout flow recomputes this from stored cart lines rather than
//! trusting any client-supplied amount.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::money::Amount;

/// Flat cart discount applied to the subtotal.
const DISCOUNT_PERCENT: u32 = 20;

/// Flat delivery fee in minor units (15.00).
pub const DELIVERY_FEE: Amount = Amount::from_minor(1500);

/// Errors that can occur while quoting a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// The cart has no lines; there is nothing to quote.
    #[error("cart is empty")]
    EmptyCart,

    /// A line or the subtotal overflowed the minor-unit range.
    #[error("cart total out of range")]
    Overflow,
}

/// One priced cart line: unit price and quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub unit_price: Amount,
    pub quantity: u32,
}

impl PricedLine {
    /// Creates a priced line.
    #[must_use]
    pub const fn new(unit_price: Amount, quantity: u32) -> Self {
        Self {
            unit_price,
            quantity,
        }
    }
}

/// The server-side price breakdown for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub subtotal: Amount,
    pub discount: Amount,
    pub delivery_fee: Amount,
    pub total: Amount,
}

/// Quotes a cart: `subtotal − 20% + delivery fee`.
///
/// The discount is rounded half-up to a whole minor unit, matching the
/// minor-unit conversion used for provider charges.
///
/// # Errors
///
/// - [`PricingError::EmptyCart`]: no lines were provided.
/// - [`PricingError::Overflow`]: the amounts exceed the minor-unit range.
pub fn quote(lines: &[PricedLine]) -> Result<Quote, PricingError> {
    if lines.is_empty() {
        return Err(PricingError::EmptyCart);
    }

    let subtotal = lines
        .iter()
        .try_fold(Amount::ZERO, |acc, line| {
            line.unit_price
                .checked_mul(line.quantity)
                .and_then(|line_total| acc.checked_add(line_total))
        })
        .ok_or(PricingError::Overflow)?;

    let discount = discount_for(subtotal)?;

    let total = subtotal
        .checked_sub(discount)
        .and_then(|after_discount| after_discount.checked_add(DELIVERY_FEE))
        .ok_or(PricingError::Overflow)?;

    Ok(Quote {
        subtotal,
        discount,
        delivery_fee: DELIVERY_FEE,
        total,
    })
}

fn discount_for(subtotal: Amount) -> Result<Amount, PricingError> {
    let rate = Decimal::from(DISCOUNT_PERCENT) / Decimal::ONE_HUNDRED;

    let discount = Decimal::from(subtotal.minor())
        .checked_mul(rate)
        .ok_or(PricingError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    discount
        .to_u64()
        .map(Amount::from_minor)
        .ok_or(PricingError::Overflow)
}
