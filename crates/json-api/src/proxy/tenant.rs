//! Shop identity resolution.
//!
//! A proxy request names its shop either through a header the fronting
//! gateway verified before forwarding, or through the `shop` query
//! parameter. The named shop earns nothing by itself: requests are only
//! served once a stored offline session matches it.

use std::sync::Arc;

use salvo::{http::header::HeaderName, prelude::*};

use ribbon_app::domain::shops::ShopDomain;

use crate::state::State;

/// Query parameter naming the shop.
pub(crate) const SHOP_PARAM: &str = "shop";

/// Depot key holding a gateway-verified shop identity.
const VERIFIED_SHOP_KEY: &str = "proxy.verified_shop";

/// Records the gateway-verified shop identity when one is configured and
/// present, so [`resolve_shop`] prefers it over the query parameter.
#[salvo::handler]
pub(crate) async fn gateway_identity(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let verified_header = depot
        .obtain::<Arc<State>>()
        .ok()
        .and_then(|state| state.verified_shop_header.clone());

    if let Some(header) = verified_header
        && let Some(shop) = header_shop(req, &header)
    {
        depot.insert(VERIFIED_SHOP_KEY, shop);
    }

    ctrl.call_next(req, depot, res).await;
}

/// The shop this request is for.
pub(crate) fn resolve_shop(req: &mut Request, depot: &Depot) -> Option<ShopDomain> {
    if let Ok(shop) = depot.get::<ShopDomain>(VERIFIED_SHOP_KEY) {
        return Some(shop.clone());
    }

    req.query::<String>(SHOP_PARAM)
        .map(|shop| shop.trim().to_owned())
        .filter(|shop| !shop.is_empty())
        .map(ShopDomain::new)
}

fn header_shop(req: &Request, header: &HeaderName) -> Option<ShopDomain> {
    let value = req.headers().get(header)?.to_str().ok()?.trim();

    if value.is_empty() {
        return None;
    }

    Some(ShopDomain::new(value))
}
