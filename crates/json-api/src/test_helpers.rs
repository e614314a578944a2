//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, http::header::HeaderName, prelude::*};

use ribbon::cards::CardCandidate;
use ribbon_app::{
    context::AppContext,
    domain::{
        cards::{MockCardsService, models::VerifiedCard},
        discounts::{MockDiscountsService, models::IssuedDiscount},
    },
};

use crate::{proxy, state::State};

pub(crate) fn strict_cards_mock() -> MockCardsService {
    let mut cards = MockCardsService::new();

    cards.expect_verify_code().never();

    cards
}

pub(crate) fn strict_discounts_mock() -> MockDiscountsService {
    let mut discounts = MockDiscountsService::new();

    discounts.expect_convert().never();

    discounts
}

pub(crate) fn strict_app() -> AppContext {
    app_with_cards(strict_cards_mock())
}

pub(crate) fn app_with_cards(cards: MockCardsService) -> AppContext {
    AppContext {
        cards: Arc::new(cards),
        discounts: Arc::new(strict_discounts_mock()),
    }
}

pub(crate) fn app_with_discounts(discounts: MockDiscountsService) -> AppContext {
    AppContext {
        cards: Arc::new(strict_cards_mock()),
        discounts: Arc::new(discounts),
    }
}

pub(crate) fn make_verified_card(balance: &str) -> VerifiedCard {
    VerifiedCard {
        candidate: CardCandidate {
            external_id: "gid://shopify/GiftCard/1".to_owned(),
            suffix: "AB12".to_owned(),
            enabled: true,
            balance: balance.parse().expect("balance should parse"),
            currency: "USD".to_owned(),
        },
    }
}

pub(crate) fn make_issued_discount(amount: &str) -> IssuedDiscount {
    IssuedDiscount {
        code: "GC-AB12-X9K2".to_owned(),
        amount: amount.parse().expect("amount should parse"),
        currency: "USD".to_owned(),
        usage_limit: 1,
        expires_at: Timestamp::now(),
    }
}

pub(crate) fn proxy_service(app: AppContext) -> Service {
    proxy_service_with_header(app, None)
}

pub(crate) fn proxy_service_with_header(
    app: AppContext,
    verified_shop_header: Option<&str>,
) -> Service {
    let header = verified_shop_header
        .map(|name| HeaderName::try_from(name).expect("header name should parse"));

    Service::new(
        Router::new()
            .hoop(inject(State::from_app_context(app, header)))
            .push(proxy::router()),
    )
}
