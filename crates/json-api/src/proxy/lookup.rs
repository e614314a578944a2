//! Code Lookup Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use ribbon::codes::normalize;

use crate::{
    extensions::*,
    proxy::{errors, responses::LookupResponse, tenant},
    state::State,
};

/// Code Lookup Handler
///
/// Verifies a customer-supplied gift-card code against the shop's balance
/// authority and reports the matched card's balance.
#[endpoint(tags("proxy"), summary = "Look up a gift card code")]
pub(crate) async fn handler(
    code: QueryParam<String, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<LookupResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(shop) = tenant::resolve_shop(req, depot) else {
        return Ok(Json(LookupResponse::not_valid(errors::NO_SHOP_CONTEXT)));
    };

    let Some(raw) = code.into_inner().filter(|code| !code.trim().is_empty()) else {
        return Ok(Json(LookupResponse::not_valid(errors::CODE_REQUIRED)));
    };

    let Ok(code) = normalize(&raw) else {
        return Ok(Json(LookupResponse::not_valid(errors::INVALID_CODE_FORMAT)));
    };

    let response = match state.app.cards.verify_code(&shop, &code).await {
        Ok(card) => LookupResponse::found(card.candidate.balance, card.candidate.currency),
        Err(error) => errors::lookup_failure(error),
    };

    Ok(Json(response))
}
