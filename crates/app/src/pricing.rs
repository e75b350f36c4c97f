//! Pricing
//!
//! Every line is rounded to cents on its own, then the rounded lines are summed
//! and the sum is rounded again. Totals must be computed this way so that a cart
//! and the receipt produced from it always agree.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of decimal places money amounts are rounded to.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Errors that can occur while pricing line items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// An amount did not fit in a [`Decimal`].
    #[error("amount overflowed while pricing line items")]
    Overflow,
}

/// Round an amount to cents, halves away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Price of a single line: `price × qty`, rounded to cents.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the product does not fit in a [`Decimal`].
pub fn line_subtotal(price: Decimal, qty: u32) -> Result<Decimal, PricingError> {
    price
        .checked_mul(Decimal::from(qty))
        .map(round_money)
        .ok_or(PricingError::Overflow)
}

/// Sum of already-rounded line subtotals, rounded to cents.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the sum does not fit in a [`Decimal`].
pub fn total<I>(subtotals: I) -> Result<Decimal, PricingError>
where
    I: IntoIterator<Item = Decimal>,
{
    subtotals
        .into_iter()
        .try_fold(Decimal::ZERO, Decimal::checked_add)
        .map(round_money)
        .ok_or(PricingError::Overflow)
}
