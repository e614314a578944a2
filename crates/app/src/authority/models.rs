//! Authority data models.

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::shops::ShopDomain,
    sessions::{AccessToken, SessionRecord},
};

/// Per-shop credentials for the authority's admin API.
///
/// The shop here always comes from a stored session row, never from raw
/// request input; it is the only value admin API URLs are built from.
#[derive(Debug, Clone)]
pub struct AuthorityAccess {
    /// Shop whose admin API is addressed.
    pub shop: ShopDomain,

    /// Access token granted to the app installation on that shop.
    pub access_token: AccessToken,
}

impl From<SessionRecord> for AuthorityAccess {
    fn from(session: SessionRecord) -> Self {
        Self {
            shop: session.shop,
            access_token: session.access_token,
        }
    }
}

/// Input for minting a discount credential.
#[derive(Debug, Clone)]
pub struct DiscountRequest {
    /// Operator-facing title shown in the authority's admin.
    pub title: String,

    /// The code customers will apply at checkout.
    pub code: String,

    /// Fixed amount the discount is worth.
    pub amount: Decimal,

    /// Currency the amount was quoted in. The authority prices basic
    /// discounts in the shop currency, so this is informational.
    pub currency: String,

    /// Start of the validity window.
    pub starts_at: Timestamp,

    /// End of the validity window.
    pub ends_at: Timestamp,

    /// How many times the code may be redeemed.
    pub usage_limit: u32,
}

/// Acknowledgement of a minted discount.
#[derive(Debug, Clone)]
pub struct MintedDiscount {
    /// The code as the authority recorded it.
    pub code: String,
}

/// Payload for creating a gift card with a chosen code.
#[derive(Debug, Clone)]
pub struct NewGiftCard {
    /// Full card code. The authority discloses only its suffix afterwards.
    pub code: String,

    /// Opening balance.
    pub initial_value: Decimal,
}

/// A freshly created gift card, as much of it as the authority discloses.
#[derive(Debug, Clone)]
pub struct GiftCardRecord {
    /// Authority-assigned identifier.
    pub external_id: String,

    /// Trailing characters of the stored code.
    pub suffix: String,
}

/// One gift card in an operator listing.
#[derive(Debug, Clone)]
pub struct GiftCardSummary {
    /// Trailing characters of the stored code.
    pub suffix: String,

    /// Opening balance.
    pub initial_value: Decimal,

    /// Remaining balance.
    pub balance: Decimal,

    /// Currency of both amounts.
    pub currency: String,

    /// Whether the card is currently redeemable.
    pub enabled: bool,
}
