//! Balance Conversion Handler

use std::sync::Arc;

use salvo::{http::Method, prelude::*};

use ribbon::codes::normalize;

use crate::{
    proxy::{
        errors,
        responses::{ConvertRequest, ConvertResponse},
        tenant,
    },
    state::State,
};

/// Balance Conversion Handler
///
/// Re-verifies a gift-card code and mints a single-use, one-hour discount
/// worth the verified balance, capped at the cart total when one is given.
#[endpoint(tags("proxy"), summary = "Convert a gift card into a discount")]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    if req.method() != Method::POST {
        res.status_code(StatusCode::METHOD_NOT_ALLOWED)
            .render(Json(ConvertResponse::failed(errors::METHOD_NOT_ALLOWED)));

        return;
    }

    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(StatusError::internal_server_error());

        return;
    };

    let Some(shop) = tenant::resolve_shop(req, depot) else {
        res.render(Json(ConvertResponse::failed(errors::NO_SHOP_CONTEXT)));

        return;
    };

    let body = match req.parse_json::<ConvertRequest>().await {
        Ok(body) => body,
        Err(source) => {
            res.render(Json(ConvertResponse::failed(format!(
                "System error: {source}"
            ))));

            return;
        }
    };

    let Some(code) = body.code.as_deref().and_then(|code| normalize(code).ok()) else {
        res.render(Json(ConvertResponse::failed(errors::INVALID_CODE_FORMAT)));

        return;
    };

    match state
        .app
        .discounts
        .convert(&shop, &code, body.cart_total)
        .await
    {
        Ok(discount) => res.render(Json(ConvertResponse::issued(&discount))),
        Err(error) => res.render(Json(errors::convert_failure(error))),
    }
}
