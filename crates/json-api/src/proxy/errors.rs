//! Proxy failure mapping.
//!
//! The storefront widget shows these messages verbatim, so the wording is
//! part of the interface. Infrastructure failures are logged with their
//! source and reported as a generic system error carrying the source's
//! summary, never a backtrace.

use tracing::error;

use ribbon_app::domain::{cards::CardsServiceError, discounts::DiscountsServiceError};

use crate::proxy::responses::{ConvertResponse, LookupResponse};

pub(crate) const NO_SHOP_CONTEXT: &str = "No shop context";
pub(crate) const CODE_REQUIRED: &str = "Code required";
pub(crate) const INVALID_CODE_FORMAT: &str = "Invalid code format";
pub(crate) const METHOD_NOT_ALLOWED: &str = "Method not allowed";

pub(crate) fn lookup_failure(error: CardsServiceError) -> LookupResponse {
    LookupResponse::not_valid(cards_message(error))
}

pub(crate) fn convert_failure(error: DiscountsServiceError) -> ConvertResponse {
    ConvertResponse::failed(discounts_message(error))
}

fn cards_message(error: CardsServiceError) -> String {
    match error {
        CardsServiceError::TenantUnresolved => "Shop session missing".to_owned(),
        CardsServiceError::NotFound { suffix, scanned } => {
            format!("Gift card not found (search: {suffix}, candidates: {scanned})")
        }
        CardsServiceError::Sessions(source) => {
            error!("session lookup failed: {source}");

            format!("System error: {source}")
        }
        CardsServiceError::Authority(source) => {
            error!("authority call failed: {source}");

            format!("System error: {source}")
        }
    }
}

fn discounts_message(error: DiscountsServiceError) -> String {
    match error {
        DiscountsServiceError::Cards(source) => cards_message(source),
        DiscountsServiceError::InvalidAmount(_source) => "Invalid discount amount".to_owned(),
        DiscountsServiceError::Rejected { message } => {
            format!("Could not create discount: {message}")
        }
        DiscountsServiceError::Authority(source) => {
            error!("discount creation failed: {source}");

            format!("System error: {source}")
        }
    }
}
