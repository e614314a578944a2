//! Sessions repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use thiserror::Error;

use crate::{
    domain::shops::ShopDomain,
    sessions::models::{AccessToken, SessionRecord},
};

const FIND_OFFLINE_SESSION_SQL: &str = include_str!("sql/find_offline_session.sql");

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum SessionsRepositoryError {
    #[error("session storage error")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for SessionsRepositoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}

/// Read-only view of the session table the platform app maintains.
#[automock]
#[async_trait]
pub trait SessionsRepository: Send + Sync {
    /// The stored offline session for `shop`, if the app is installed there.
    async fn find_offline_session(
        &self,
        shop: &ShopDomain,
    ) -> Result<Option<SessionRecord>, SessionsRepositoryError>;
}

#[derive(Debug, Clone)]
pub struct PgSessionsRepository {
    pool: PgPool,
}

impl PgSessionsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionsRepository for PgSessionsRepository {
    async fn find_offline_session(
        &self,
        shop: &ShopDomain,
    ) -> Result<Option<SessionRecord>, SessionsRepositoryError> {
        query_as::<Postgres, SessionRecord>(FIND_OFFLINE_SESSION_SQL)
            .bind(shop.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(SessionsRepositoryError::from)
    }
}

impl<'r> FromRow<'r, PgRow> for SessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            shop: ShopDomain::new(row.try_get::<String, _>("shop")?),
            access_token: AccessToken::new(row.try_get::<String, _>("accessToken")?),
            is_online: row.try_get("isOnline")?,
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
