//! Request logging and request id propagation.
//!
//! Every request is tagged with an id (caller-provided or generated) that is
//! echoed back on the response and attached to the request span, so a single
//! proxy round-trip can be traced across the gateway and this service.

use std::time::Instant;

use salvo::{
    Request, handler,
    http::{StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, error, info, warn};
use uuid::Uuid;

/// Header carrying the request id, on both request and response.
pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let started = Instant::now();

    let request_id = resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

    set_request_id_header(res, &request_id);

    let span = tracing::info_span!(
        "http.request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    ctrl.call_next(req, depot, res)
        .instrument(span.clone())
        .await;

    let status = response_status_or_ok(res.status_code);
    let duration_ms = started.elapsed().as_millis();

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        if status.is_server_error() {
            error!("request.completed");
        } else {
            info!("request.completed");
        }
    });
}

/// Reuses the caller's request id when it sent a non-blank one, otherwise
/// mints a fresh one.
fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn set_request_id_header(res: &mut Response, request_id: &str) {
    let Ok(header_value) = HeaderValue::from_str(request_id) else {
        warn!(request_id, "request id is not a valid header value");

        return;
    };

    res.headers_mut().insert(REQUEST_ID_HEADER, header_value);
}

fn response_status_or_ok(status_code: Option<StatusCode>) -> StatusCode {
    status_code.unwrap_or(StatusCode::OK)
}
