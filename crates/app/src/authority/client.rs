//! GraphQL admin API client for the authority.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use ribbon::{cards::CardCandidate, codes::CardSuffix};

use crate::authority::models::{
    AuthorityAccess, DiscountRequest, GiftCardRecord, GiftCardSummary, MintedDiscount,
    NewGiftCard,
};

/// Admin API version addressed when none is configured.
pub const DEFAULT_API_VERSION: &str = "2026-07";

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

const FIND_GIFT_CARDS_QUERY: &str = include_str!("graphql/find_gift_cards.graphql");
const CREATE_DISCOUNT_MUTATION: &str = include_str!("graphql/create_discount.graphql");
const CREATE_GIFT_CARD_MUTATION: &str = include_str!("graphql/create_gift_card.graphql");
const LIST_GIFT_CARDS_QUERY: &str = include_str!("graphql/list_gift_cards.graphql");

/// Configuration for addressing the authority's admin API.
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
    /// Admin API version segment, e.g. `"2026-07"`.
    pub api_version: String,
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// The two operations the redemption workflow needs from the authority.
#[automock]
#[async_trait]
pub trait Authority: Send + Sync {
    /// Card candidates whose stored code ends in `suffix`, up to `first` of
    /// them, in authority order.
    ///
    /// The authority matches the suffix index; candidates still carry their
    /// own disclosed suffix so callers can re-check it.
    async fn find_candidates_by_suffix(
        &self,
        access: &AuthorityAccess,
        suffix: &CardSuffix,
        first: u32,
    ) -> Result<Vec<CardCandidate>, AuthorityError>;

    /// Mint a fixed-amount, whole-order discount code available to all
    /// customers.
    async fn create_fixed_amount_discount(
        &self,
        access: &AuthorityAccess,
        request: &DiscountRequest,
    ) -> Result<MintedDiscount, AuthorityError>;
}

/// HTTP client for the authority's admin GraphQL API.
///
/// Holds no per-shop state: every call takes explicit [`AuthorityAccess`],
/// so one client serves all shops.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    http: Client,
    config: AuthorityConfig,
}

impl AdminApiClient {
    /// Create a new client from a shared HTTP client and configuration.
    #[must_use]
    pub fn new(http: Client, config: AuthorityConfig) -> Self {
        Self { http, config }
    }

    async fn execute<T>(
        &self,
        access: &AuthorityAccess,
        operation: &str,
        document: &str,
        variables: Value,
    ) -> Result<T, AuthorityError>
    where
        T: DeserializeOwned,
    {
        let url = format!(
            "https://{}/admin/api/{}/graphql.json",
            access.shop, self.config.api_version
        );

        let body = serde_json::json!({ "query": document, "variables": variables });

        let response = self
            .http
            .post(&url)
            .header(ACCESS_TOKEN_HEADER, access.access_token.as_str())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(AuthorityError::UnexpectedResponse(format!(
                "{operation} request failed with status {status}: {text}"
            )));
        }

        let parsed: Envelope<T> = response.json().await?;

        parsed.into_data(operation)
    }

    /// Create a gift card with a caller-chosen code.
    ///
    /// The authority stores the code and will only ever disclose its
    /// trailing characters again.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, an unexpected response body, or
    /// when the authority rejects the card.
    pub async fn create_gift_card(
        &self,
        access: &AuthorityAccess,
        card: &NewGiftCard,
    ) -> Result<GiftCardRecord, AuthorityError> {
        let variables = serde_json::json!({
            "input": {
                "code": card.code,
                "initialValue": card.initial_value,
            },
        });

        let data: GiftCardCreateData = self
            .execute(access, "gift card create", CREATE_GIFT_CARD_MUTATION, variables)
            .await?;

        let payload = data.gift_card_create.ok_or_else(|| {
            AuthorityError::UnexpectedResponse(
                "gift card create response carried no payload".to_string(),
            )
        })?;

        created_gift_card(payload)
    }

    /// The most recently created gift cards, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn list_gift_cards(
        &self,
        access: &AuthorityAccess,
        first: u32,
    ) -> Result<Vec<GiftCardSummary>, AuthorityError> {
        let variables = serde_json::json!({ "first": first });

        let data: GiftCardsData<SummaryNode> = self
            .execute(access, "gift card list", LIST_GIFT_CARDS_QUERY, variables)
            .await?;

        Ok(data
            .gift_cards
            .edges
            .into_iter()
            .map(|edge| edge.node.into())
            .collect())
    }
}

#[async_trait]
impl Authority for AdminApiClient {
    async fn find_candidates_by_suffix(
        &self,
        access: &AuthorityAccess,
        suffix: &CardSuffix,
        first: u32,
    ) -> Result<Vec<CardCandidate>, AuthorityError> {
        let variables = serde_json::json!({
            "first": first,
            "query": format!("last_characters:{suffix}"),
        });

        let data: GiftCardsData<CandidateNode> = self
            .execute(access, "gift card search", FIND_GIFT_CARDS_QUERY, variables)
            .await?;

        Ok(data
            .gift_cards
            .edges
            .into_iter()
            .map(|edge| edge.node.into())
            .collect())
    }

    async fn create_fixed_amount_discount(
        &self,
        access: &AuthorityAccess,
        request: &DiscountRequest,
    ) -> Result<MintedDiscount, AuthorityError> {
        let variables = serde_json::json!({
            "basicCodeDiscount": {
                "title": request.title,
                "code": request.code,
                "startsAt": request.starts_at,
                "endsAt": request.ends_at,
                "customerSelection": { "all": true },
                "customerGets": {
                    "value": {
                        "discountAmount": {
                            "amount": request.amount,
                            "appliesOnEachItem": false,
                        },
                    },
                    "items": { "all": true },
                },
                "usageLimit": request.usage_limit,
            },
        });

        let data: DiscountCreateData = self
            .execute(access, "discount create", CREATE_DISCOUNT_MUTATION, variables)
            .await?;

        let payload = data.discount_code_basic_create.ok_or_else(|| {
            AuthorityError::UnexpectedResponse(
                "discount create response carried no payload".to_string(),
            )
        })?;

        minted_discount(payload, &request.code)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<QueryError>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    message: String,
}

impl<T> Envelope<T> {
    fn into_data(self, operation: &str) -> Result<T, AuthorityError> {
        if let Some(error) = self.errors.first() {
            return Err(AuthorityError::UnexpectedResponse(format!(
                "{operation} query error: {}",
                error.message
            )));
        }

        self.data.ok_or_else(|| {
            AuthorityError::UnexpectedResponse(format!(
                "{operation} response carried no data"
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GiftCardsData<N> {
    gift_cards: Connection<N>,
}

#[derive(Debug, Deserialize)]
struct Connection<N> {
    edges: Vec<Edge<N>>,
}

#[derive(Debug, Deserialize)]
struct Edge<N> {
    node: N,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateNode {
    id: String,
    last_characters: String,
    enabled: bool,
    balance: MoneyNode,
}

impl From<CandidateNode> for CardCandidate {
    fn from(node: CandidateNode) -> Self {
        Self {
            external_id: node.id,
            suffix: node.last_characters,
            enabled: node.enabled,
            balance: node.balance.amount,
            currency: node.balance.currency_code,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryNode {
    last_characters: String,
    initial_value: MoneyNode,
    balance: MoneyNode,
    enabled: bool,
}

impl From<SummaryNode> for GiftCardSummary {
    fn from(node: SummaryNode) -> Self {
        Self {
            suffix: node.last_characters,
            initial_value: node.initial_value.amount,
            balance: node.balance.amount,
            currency: node.balance.currency_code,
            enabled: node.enabled,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoneyNode {
    amount: Decimal,
    currency_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscountCreateData {
    discount_code_basic_create: Option<DiscountCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscountCreatePayload {
    code_discount_node: Option<CodeDiscountNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeDiscountNode {
    code_discount: Option<CodeDiscount>,
}

#[derive(Debug, Deserialize)]
struct CodeDiscount {
    #[serde(default)]
    codes: Option<CodeNodes>,
}

#[derive(Debug, Deserialize)]
struct CodeNodes {
    nodes: Vec<CodeNode>,
}

#[derive(Debug, Deserialize)]
struct CodeNode {
    code: String,
}

#[derive(Debug, Deserialize)]
struct UserError {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GiftCardCreateData {
    gift_card_create: Option<GiftCardCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GiftCardCreatePayload {
    gift_card: Option<CreatedGiftCardNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedGiftCardNode {
    id: String,
    last_characters: String,
}

fn joined_user_errors(errors: &[UserError]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }

    Some(
        errors
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn minted_discount(
    payload: DiscountCreatePayload,
    requested_code: &str,
) -> Result<MintedDiscount, AuthorityError> {
    if let Some(message) = joined_user_errors(&payload.user_errors) {
        return Err(AuthorityError::Rejected { message });
    }

    // The code is read back from the response when present, but some API
    // versions omit the codes connection; the requested code is then the one
    // the authority stored.
    let code = payload
        .code_discount_node
        .and_then(|node| node.code_discount)
        .and_then(|discount| discount.codes)
        .and_then(|codes| codes.nodes.into_iter().next())
        .map_or_else(|| requested_code.to_string(), |node| node.code);

    Ok(MintedDiscount { code })
}

fn created_gift_card(payload: GiftCardCreatePayload) -> Result<GiftCardRecord, AuthorityError> {
    if let Some(message) = joined_user_errors(&payload.user_errors) {
        return Err(AuthorityError::Rejected { message });
    }

    payload
        .gift_card
        .map(|card| GiftCardRecord {
            external_id: card.id,
            suffix: card.last_characters,
        })
        .ok_or_else(|| {
            AuthorityError::UnexpectedResponse(
                "gift card create response carried no gift card".to_string(),
            )
        })
}

/// Errors that can occur when talking to the authority.
#[derive(Debug, Error)]
pub enum AuthorityError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The authority returned a non-2xx response or an unexpected body.
    #[error("unexpected response from authority: {0}")]
    UnexpectedResponse(String),

    /// The authority accepted the request but rejected its content.
    #[error("authority rejected the request: {message}")]
    Rejected {
        /// The authority's own description of the rejection.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn candidate_nodes_map_onto_candidates() -> TestResult {
        let data: GiftCardsData<CandidateNode> = serde_json::from_value(json!({
            "giftCards": {
                "edges": [
                    {
                        "node": {
                            "id": "gid://shopify/GiftCard/1",
                            "lastCharacters": "ab12",
                            "enabled": true,
                            "balance": { "amount": "25.00", "currencyCode": "USD" },
                        },
                    },
                ],
            },
        }))?;

        let candidates: Vec<CardCandidate> = data
            .gift_cards
            .edges
            .into_iter()
            .map(|edge| edge.node.into())
            .collect();

        assert_eq!(candidates.len(), 1, "expected a single candidate");

        let candidate = candidates.first().expect("candidate should be present");

        assert_eq!(candidate.external_id, "gid://shopify/GiftCard/1");
        assert_eq!(candidate.suffix, "ab12");
        assert!(candidate.enabled, "candidate should be enabled");
        assert_eq!(candidate.balance, Decimal::new(2500, 2));
        assert_eq!(candidate.currency, "USD");

        Ok(())
    }

    #[test]
    fn envelope_surfaces_query_errors() -> TestResult {
        let envelope: Envelope<GiftCardsData<CandidateNode>> = serde_json::from_value(json!({
            "errors": [{ "message": "throttled" }],
        }))?;

        let result = envelope.into_data("gift card search");

        assert!(
            matches!(
                result,
                Err(AuthorityError::UnexpectedResponse(ref message))
                    if message.contains("throttled")
            ),
            "expected an unexpected-response error, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn envelope_without_data_is_an_error() -> TestResult {
        let envelope: Envelope<GiftCardsData<CandidateNode>> =
            serde_json::from_value(json!({}))?;

        let result = envelope.into_data("gift card search");

        assert!(
            matches!(result, Err(AuthorityError::UnexpectedResponse(_))),
            "expected an unexpected-response error, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn minted_discount_prefers_the_echoed_code() -> TestResult {
        let payload: DiscountCreatePayload = serde_json::from_value(json!({
            "codeDiscountNode": {
                "codeDiscount": {
                    "codes": { "nodes": [{ "code": "GC-AB12-X7Q2" }] },
                },
            },
            "userErrors": [],
        }))?;

        let minted = minted_discount(payload, "GC-AB12-REQUESTED")?;

        assert_eq!(minted.code, "GC-AB12-X7Q2");

        Ok(())
    }

    #[test]
    fn minted_discount_falls_back_to_the_requested_code() -> TestResult {
        let payload: DiscountCreatePayload = serde_json::from_value(json!({
            "codeDiscountNode": null,
            "userErrors": [],
        }))?;

        let minted = minted_discount(payload, "GC-ZZ99-K3M8")?;

        assert_eq!(minted.code, "GC-ZZ99-K3M8");

        Ok(())
    }

    #[test]
    fn minted_discount_joins_user_error_messages() -> TestResult {
        let payload: DiscountCreatePayload = serde_json::from_value(json!({
            "codeDiscountNode": null,
            "userErrors": [
                { "message": "code already exists" },
                { "message": "title too long" },
            ],
        }))?;

        let result = minted_discount(payload, "GC-AB12-X7Q2");

        assert!(
            matches!(
                result,
                Err(AuthorityError::Rejected { ref message })
                    if message == "code already exists, title too long"
            ),
            "expected a rejection with joined messages, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn created_gift_card_maps_the_node() -> TestResult {
        let payload: GiftCardCreatePayload = serde_json::from_value(json!({
            "giftCard": {
                "id": "gid://shopify/GiftCard/42",
                "lastCharacters": "zz99",
            },
            "userErrors": [],
        }))?;

        let record = created_gift_card(payload)?;

        assert_eq!(record.external_id, "gid://shopify/GiftCard/42");
        assert_eq!(record.suffix, "zz99");

        Ok(())
    }

    #[test]
    fn created_gift_card_rejection_carries_the_message() -> TestResult {
        let payload: GiftCardCreatePayload = serde_json::from_value(json!({
            "giftCard": null,
            "userErrors": [{ "message": "code is too short" }],
        }))?;

        let result = created_gift_card(payload);

        assert!(
            matches!(
                result,
                Err(AuthorityError::Rejected { ref message })
                    if message == "code is too short"
            ),
            "expected a rejection, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn summary_nodes_keep_both_amounts() -> TestResult {
        let data: GiftCardsData<SummaryNode> = serde_json::from_value(json!({
            "giftCards": {
                "edges": [
                    {
                        "node": {
                            "lastCharacters": "cd34",
                            "initialValue": { "amount": "50.00", "currencyCode": "EUR" },
                            "balance": { "amount": "12.50", "currencyCode": "EUR" },
                            "enabled": false,
                        },
                    },
                ],
            },
        }))?;

        let summaries: Vec<GiftCardSummary> = data
            .gift_cards
            .edges
            .into_iter()
            .map(|edge| edge.node.into())
            .collect();

        let summary = summaries.first().expect("summary should be present");

        assert_eq!(summary.suffix, "cd34");
        assert_eq!(summary.initial_value, Decimal::new(5000, 2));
        assert_eq!(summary.balance, Decimal::new(1250, 2));
        assert_eq!(summary.currency, "EUR");
        assert!(!summary.enabled, "summary should keep the disabled flag");

        Ok(())
    }
}
