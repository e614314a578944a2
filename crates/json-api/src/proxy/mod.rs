//! Storefront Proxy Endpoints
//!
//! The two operations the storefront widget calls through the shop's app
//! proxy: looking a gift-card code up and converting its balance into a
//! single-use discount. Both answer HTTP 200 with an in-band envelope;
//! transport-level statuses are reserved for requests that never reached
//! the handlers.

mod convert;
mod errors;
mod headers;
mod lookup;
mod responses;
mod tenant;

use salvo::Router;

/// Routes served under the proxy mount.
pub(crate) fn router() -> Router {
    Router::new()
        .hoop(headers::handler)
        .hoop(tenant::gateway_identity)
        .push(Router::with_path("lookup").get(lookup::handler))
        .push(Router::with_path("convert").goal(convert::handler))
}
