//! Session store models.

use std::fmt;

use jiff::Timestamp;
use zeroize::Zeroize;

use crate::domain::shops::ShopDomain;

/// Admin API access token for a shop, zeroed on drop.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for authenticating admin API requests.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")?;
        Ok(())
    }
}

impl Drop for AccessToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// One row of the session store.
///
/// The store is written by the platform app that performed the OAuth
/// handshake; this service only ever reads it.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Shop the session belongs to.
    pub shop: ShopDomain,

    /// Admin API token granted to the shop's installation.
    pub access_token: AccessToken,

    /// Whether the session is online (user-scoped, short-lived).
    pub is_online: bool,

    /// Expiry of online sessions; offline sessions carry none.
    pub expires_at: Option<Timestamp>,
}
