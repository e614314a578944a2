//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    authority::{AdminApiClient, Authority, AuthorityConfig},
    database,
    domain::{
        cards::{AdminCardsService, CardsService},
        discounts::{AdminDiscountsService, DiscountsService},
    },
    sessions::{PgSessionsRepository, SessionsRepository},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub cards: Arc<dyn CardsService>,
    pub discounts: Arc<dyn DiscountsService>,
}

impl AppContext {
    /// Build application context from a database URL and an authority client
    /// configuration.
    ///
    /// One HTTP client serves every shop; per-shop credentials come from the
    /// session store at request time.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        config: AuthorityConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let sessions: Arc<dyn SessionsRepository> = Arc::new(PgSessionsRepository::new(pool));
        let authority: Arc<dyn Authority> =
            Arc::new(AdminApiClient::new(reqwest::Client::new(), config));

        Ok(Self {
            cards: Arc::new(AdminCardsService::new(
                Arc::clone(&sessions),
                Arc::clone(&authority),
            )),
            discounts: Arc::new(AdminDiscountsService::new(sessions, authority)),
        })
    }
}
