//! Shop identity.

use std::fmt;

/// The merchant scope every operation runs under.
///
/// Carries the platform shop domain, e.g. `demo.myshopify.com`. The value is
/// whatever the boundary resolved for the request; it earns no trust until a
/// stored session row matches it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Wrap a resolved shop domain.
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self(domain.into())
    }

    /// The shop domain as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShopDomain {
    fn from(domain: &str) -> Self {
        Self::new(domain)
    }
}
