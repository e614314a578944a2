//! Proxy response headers.

use salvo::{
    http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue},
    prelude::*,
};

/// Marks every proxy response as readable from any storefront origin.
///
/// The envelope carries no secrets beyond what the caller already supplied,
/// and themes fetch it from origins the shop controls.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    res.headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

    ctrl.call_next(req, depot, res).await;
}
