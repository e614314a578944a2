//! Discounts service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{Span, info};

use ribbon::{amounts::bounded_discount, codes::NormalizedCode};

use crate::{
    authority::{Authority, AuthorityError, DiscountRequest},
    domain::{
        cards::{AdminCardsService, CONVERT_CANDIDATE_PAGE},
        discounts::{
            code::generate_discount_code, errors::DiscountsServiceError, models::IssuedDiscount,
        },
        shops::ShopDomain,
    },
    sessions::SessionsRepository,
};

/// Minted credentials may be redeemed exactly once.
pub const SINGLE_USE_LIMIT: u32 = 1;

/// How long a minted credential stays applicable.
///
/// Long enough to finish a checkout, short enough to bound the exposure of
/// an abandoned cart.
pub const DISCOUNT_TTL: SignedDuration = SignedDuration::from_hours(1);

/// [`DiscountsService`] backed by the authority's admin API.
#[derive(Clone)]
pub struct AdminDiscountsService {
    cards: AdminCardsService,
    authority: Arc<dyn Authority>,
}

impl AdminDiscountsService {
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionsRepository>, authority: Arc<dyn Authority>) -> Self {
        Self {
            cards: AdminCardsService::new(sessions, Arc::clone(&authority)),
            authority,
        }
    }
}

#[async_trait]
impl DiscountsService for AdminDiscountsService {
    #[tracing::instrument(
        name = "discounts.service.convert",
        skip(self, code),
        fields(
            shop = %shop,
            suffix = %code.suffix(),
            amount = tracing::field::Empty
        ),
        err
    )]
    async fn convert(
        &self,
        shop: &ShopDomain,
        code: &NormalizedCode,
        cart_total: Option<Decimal>,
    ) -> Result<IssuedDiscount, DiscountsServiceError> {
        let access = self.cards.authority_access(shop).await?;

        // Conversion re-verifies against current state; the wider page keeps
        // colliding suffixes inside one scan.
        let verified = self
            .cards
            .verify_with_access(&access, code, CONVERT_CANDIDATE_PAGE)
            .await?;

        let candidate = verified.candidate;
        let amount = bounded_discount(candidate.balance, cart_total)?;

        Span::current().record("amount", tracing::field::display(amount));

        let starts_at = Timestamp::now();

        let request = DiscountRequest {
            title: format!("Gift Card {}", code.suffix()),
            code: generate_discount_code(code.suffix()),
            amount,
            currency: candidate.currency,
            starts_at,
            ends_at: starts_at + DISCOUNT_TTL,
            usage_limit: SINGLE_USE_LIMIT,
        };

        let minted = self
            .authority
            .create_fixed_amount_discount(&access, &request)
            .await
            .map_err(|error| match error {
                AuthorityError::Rejected { message } => DiscountsServiceError::Rejected { message },
                other => DiscountsServiceError::Authority(other),
            })?;

        info!(expires_at = %request.ends_at, "minted a discount credential");

        Ok(IssuedDiscount {
            code: minted.code,
            amount,
            currency: request.currency,
            usage_limit: request.usage_limit,
            expires_at: request.ends_at,
        })
    }
}

/// Converts verified balances into single-use discount credentials.
#[automock]
#[async_trait]
pub trait DiscountsService: Send + Sync {
    /// Re-verify the code against current state and mint a discount worth
    /// the verified balance, capped at `cart_total` when one is given.
    async fn convert(
        &self,
        shop: &ShopDomain,
        code: &NormalizedCode,
        cart_total: Option<Decimal>,
    ) -> Result<IssuedDiscount, DiscountsServiceError>;
}
