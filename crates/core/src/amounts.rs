//! Bounded discount amount computation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from discount amount computation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The computed discount would be zero or negative.
    #[error("computed discount amount {amount} is not positive")]
    NotPositive {
        /// The offending amount.
        amount: Decimal,
    },
}

/// Compute the discount amount for a verified balance and the current cart.
///
/// Without a positive cart total the full remaining balance is used, since
/// the credential may be prepared before the cart is populated. With one,
/// the amount is capped at the cart total so the storefront never shows a
/// discount larger than the purchase, even though the underlying balance
/// may be.
///
/// # Errors
///
/// Returns [`AmountError::NotPositive`] when the computed amount is zero or
/// negative.
pub fn bounded_discount(
    balance: Decimal,
    cart_total: Option<Decimal>,
) -> Result<Decimal, AmountError> {
    let amount = match cart_total.filter(|total| *total > Decimal::ZERO) {
        Some(total) => balance.min(total),
        None => balance,
    };

    if amount <= Decimal::ZERO {
        return Err(AmountError::NotPositive { amount });
    }

    Ok(amount)
}
