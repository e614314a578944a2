//! Cards service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use ribbon::{cards::select_card, codes::NormalizedCode};

use crate::{
    authority::{Authority, AuthorityAccess},
    domain::{
        cards::{errors::CardsServiceError, models::VerifiedCard},
        shops::ShopDomain,
    },
    sessions::SessionsRepository,
};

/// Candidate page size for balance lookups.
pub const LOOKUP_CANDIDATE_PAGE: u32 = 10;

/// Candidate page size when converting a balance into a discount.
pub const CONVERT_CANDIDATE_PAGE: u32 = 20;

/// [`CardsService`] backed by the authority's admin API.
#[derive(Clone)]
pub struct AdminCardsService {
    sessions: Arc<dyn SessionsRepository>,
    authority: Arc<dyn Authority>,
}

impl AdminCardsService {
    #[must_use]
    pub fn new(sessions: Arc<dyn SessionsRepository>, authority: Arc<dyn Authority>) -> Self {
        Self {
            sessions,
            authority,
        }
    }

    /// Resolve the shop's admin credentials from the session store.
    pub(crate) async fn authority_access(
        &self,
        shop: &ShopDomain,
    ) -> Result<AuthorityAccess, CardsServiceError> {
        self.sessions
            .find_offline_session(shop)
            .await?
            .map(AuthorityAccess::from)
            .ok_or(CardsServiceError::TenantUnresolved)
    }

    /// Search the authority for the code's suffix and apply the trust policy.
    ///
    /// Shared by lookups and conversions so both consult the same current
    /// state; a conversion never reuses the result of an earlier lookup.
    pub(crate) async fn verify_with_access(
        &self,
        access: &AuthorityAccess,
        code: &NormalizedCode,
        first: u32,
    ) -> Result<VerifiedCard, CardsServiceError> {
        let suffix = code.suffix();

        let candidates = self
            .authority
            .find_candidates_by_suffix(access, suffix, first)
            .await?;

        match select_card(&candidates, suffix) {
            Some(candidate) => {
                info!(
                    external_id = %candidate.external_id,
                    scanned = candidates.len(),
                    "matched a gift card"
                );

                Ok(VerifiedCard {
                    candidate: candidate.clone(),
                })
            }
            None => {
                warn!(
                    scanned = candidates.len(),
                    "no enabled, funded candidate matched"
                );

                Err(CardsServiceError::NotFound {
                    suffix: suffix.clone(),
                    scanned: candidates.len(),
                })
            }
        }
    }
}

#[async_trait]
impl CardsService for AdminCardsService {
    #[tracing::instrument(
        name = "cards.service.verify_code",
        skip(self, code),
        fields(shop = %shop, suffix = %code.suffix()),
        err
    )]
    async fn verify_code(
        &self,
        shop: &ShopDomain,
        code: &NormalizedCode,
    ) -> Result<VerifiedCard, CardsServiceError> {
        let access = self.authority_access(shop).await?;

        self.verify_with_access(&access, code, LOOKUP_CANDIDATE_PAGE)
            .await
    }
}

/// Verifies customer-supplied codes against the authority's current state.
#[automock]
#[async_trait]
pub trait CardsService: Send + Sync {
    /// Verify a normalized code for the shop and report the matched card.
    async fn verify_code(
        &self,
        shop: &ShopDomain,
        code: &NormalizedCode,
    ) -> Result<VerifiedCard, CardsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use ribbon::{cards::CardCandidate, codes::normalize};

    use crate::{
        authority::MockAuthority,
        sessions::{AccessToken, MockSessionsRepository, SessionRecord, SessionsRepositoryError},
    };

    use super::*;

    fn offline_session(shop: &str) -> SessionRecord {
        SessionRecord {
            shop: ShopDomain::new(shop),
            access_token: AccessToken::new("shpat_test"),
            is_online: false,
            expires_at: None,
        }
    }

    fn candidate(id: &str, suffix: &str, enabled: bool, balance: Decimal) -> CardCandidate {
        CardCandidate {
            external_id: id.to_string(),
            suffix: suffix.to_string(),
            enabled,
            balance,
            currency: "USD".to_string(),
        }
    }

    fn sessions_returning(shop: &str, record: Option<SessionRecord>) -> MockSessionsRepository {
        let shop = shop.to_string();
        let mut sessions = MockSessionsRepository::new();

        sessions
            .expect_find_offline_session()
            .once()
            .withf(move |requested| requested.as_str() == shop)
            .return_once(move |_| Ok(record));

        sessions
    }

    #[tokio::test]
    async fn verify_code_returns_the_matched_card() -> TestResult {
        let shop = ShopDomain::new("demo.myshopify.com");
        let code = normalize("ab-1234 ab12")?;
        let sessions = sessions_returning(shop.as_str(), Some(offline_session(shop.as_str())));

        let mut authority = MockAuthority::new();

        authority
            .expect_find_candidates_by_suffix()
            .once()
            .withf(|access, suffix, first| {
                access.shop.as_str() == "demo.myshopify.com"
                    && suffix.as_str() == "AB12"
                    && *first == LOOKUP_CANDIDATE_PAGE
            })
            .return_once(|_, _, _| Ok(vec![candidate("gid:1", "AB12", true, Decimal::new(2500, 2))]));

        let service = AdminCardsService::new(Arc::new(sessions), Arc::new(authority));

        let verified = service.verify_code(&shop, &code).await?;

        assert_eq!(verified.candidate.balance, Decimal::new(2500, 2));
        assert_eq!(verified.candidate.currency, "USD");

        Ok(())
    }

    #[tokio::test]
    async fn verify_code_without_a_session_is_tenant_unresolved() -> TestResult {
        let shop = ShopDomain::new("never-installed.myshopify.com");
        let code = normalize("ab-1234 ab12")?;
        let sessions = sessions_returning(shop.as_str(), None);

        let mut authority = MockAuthority::new();

        authority.expect_find_candidates_by_suffix().never();

        let service = AdminCardsService::new(Arc::new(sessions), Arc::new(authority));

        let result = service.verify_code(&shop, &code).await;

        assert!(
            matches!(result, Err(CardsServiceError::TenantUnresolved)),
            "expected TenantUnresolved, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn verify_code_reports_suffix_and_scan_count_on_a_miss() -> TestResult {
        let shop = ShopDomain::new("demo.myshopify.com");
        let code = normalize("zz99")?;
        let sessions = sessions_returning(shop.as_str(), Some(offline_session(shop.as_str())));

        let mut authority = MockAuthority::new();

        authority
            .expect_find_candidates_by_suffix()
            .once()
            .return_once(|_, _, _| Ok(vec![]));

        let service = AdminCardsService::new(Arc::new(sessions), Arc::new(authority));

        let result = service.verify_code(&shop, &code).await;

        match result {
            Err(CardsServiceError::NotFound { suffix, scanned }) => {
                assert_eq!(suffix.as_str(), "ZZ99");
                assert_eq!(scanned, 0, "no candidates were returned");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn verify_code_never_matches_disabled_or_unfunded_candidates() -> TestResult {
        let shop = ShopDomain::new("demo.myshopify.com");
        let code = normalize("cd34")?;
        let sessions = sessions_returning(shop.as_str(), Some(offline_session(shop.as_str())));

        let mut authority = MockAuthority::new();

        authority
            .expect_find_candidates_by_suffix()
            .once()
            .return_once(|_, _, _| {
                Ok(vec![
                    candidate("gid:1", "CD34", false, Decimal::new(5000, 2)),
                    candidate("gid:2", "CD34", true, Decimal::ZERO),
                ])
            });

        let service = AdminCardsService::new(Arc::new(sessions), Arc::new(authority));

        let result = service.verify_code(&shop, &code).await;

        match result {
            Err(CardsServiceError::NotFound { scanned, .. }) => {
                assert_eq!(scanned, 2, "both candidates should be counted");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn verify_code_selects_the_first_surviving_candidate() -> TestResult {
        let shop = ShopDomain::new("demo.myshopify.com");
        let code = normalize("cd34")?;
        let sessions = sessions_returning(shop.as_str(), Some(offline_session(shop.as_str())));

        let mut authority = MockAuthority::new();

        authority
            .expect_find_candidates_by_suffix()
            .once()
            .return_once(|_, _, _| {
                Ok(vec![
                    candidate("gid:1", "CD34", true, Decimal::new(1000, 2)),
                    candidate("gid:2", "CD34", true, Decimal::new(9000, 2)),
                ])
            });

        let service = AdminCardsService::new(Arc::new(sessions), Arc::new(authority));

        let verified = service.verify_code(&shop, &code).await?;

        assert_eq!(
            verified.candidate.external_id, "gid:1",
            "authority order decides between colliding candidates"
        );

        Ok(())
    }

    #[tokio::test]
    async fn verify_code_propagates_session_store_failures() -> TestResult {
        let shop = ShopDomain::new("demo.myshopify.com");
        let code = normalize("ab12")?;

        let mut sessions = MockSessionsRepository::new();

        sessions
            .expect_find_offline_session()
            .once()
            .return_once(|_| Err(SessionsRepositoryError::Sql(sqlx::Error::PoolClosed)));

        let mut authority = MockAuthority::new();

        authority.expect_find_candidates_by_suffix().never();

        let service = AdminCardsService::new(Arc::new(sessions), Arc::new(authority));

        let result = service.verify_code(&shop, &code).await;

        assert!(
            matches!(result, Err(CardsServiceError::Sessions(_))),
            "expected a session store error, got {result:?}"
        );

        Ok(())
    }
}
