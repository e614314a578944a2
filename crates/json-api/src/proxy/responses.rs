//! Proxy envelopes.
//!
//! Outcomes are reported in-band: the HTTP status stays 200 for every
//! handled case and the envelope says whether the operation succeeded, so
//! the storefront widget renders one payload shape instead of
//! special-casing transport errors.

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use ribbon_app::domain::discounts::models::IssuedDiscount;

/// Body of a lookup response.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LookupResponse {
    /// Whether an enabled, funded card matched the code
    pub valid: bool,

    /// Remaining balance of the matched card, as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<String>,

    /// Currency of the balance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Why the lookup failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LookupResponse {
    pub(crate) fn found(balance: Decimal, currency: String) -> Self {
        LookupResponse {
            valid: true,
            balance: Some(balance.to_string()),
            currency: Some(currency),
            message: None,
        }
    }

    pub(crate) fn not_valid(message: impl Into<String>) -> Self {
        LookupResponse {
            valid: false,
            balance: None,
            currency: None,
            message: Some(message.into()),
        }
    }
}

/// Body of a convert request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConvertRequest {
    /// Gift-card code to redeem
    #[serde(default)]
    pub code: Option<String>,

    /// Cart total capping the discount, as a decimal
    #[serde(default)]
    pub cart_total: Option<Decimal>,
}

/// Body of a convert response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConvertResponse {
    /// Whether a discount code was issued
    pub ok: bool,

    /// The issued single-use discount code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,

    /// Value of the issued discount, as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<String>,

    /// Outcome description for the storefront
    pub message: String,
}

impl ConvertResponse {
    pub(crate) fn issued(discount: &IssuedDiscount) -> Self {
        ConvertResponse {
            ok: true,
            discount_code: Some(discount.code.clone()),
            discount_amount: Some(discount.amount.to_string()),
            message: "Gift card applied".to_owned(),
        }
    }

    pub(crate) fn failed(message: impl Into<String>) -> Self {
        ConvertResponse {
            ok: false,
            discount_code: None,
            discount_amount: None,
            message: message.into(),
        }
    }
}
