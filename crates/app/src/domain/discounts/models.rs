//! Discounts service models.

use jiff::Timestamp;
use rust_decimal::Decimal;

/// A single-use discount credential minted for a verified balance.
///
/// The authority holds the only durable record; this value lives just long
/// enough to be handed back to the storefront.
#[derive(Debug, Clone)]
pub struct IssuedDiscount {
    /// The discount code to apply at checkout.
    pub code: String,

    /// Fixed amount the code is worth.
    pub amount: Decimal,

    /// Currency of the matched card's balance.
    pub currency: String,

    /// How many times the code may be redeemed.
    pub usage_limit: u32,

    /// When the code stops being applicable.
    pub expires_at: Timestamp,
}
