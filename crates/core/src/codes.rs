//! Gift-card code normalisation.
//!
//! Customers copy codes from physical cards, so the raw input arrives with
//! arbitrary casing, spaces and hyphen grouping. Normalisation produces the
//! canonical form used for searching and the 4-character suffix the authority
//! is willing to match on.

use std::fmt;

use thiserror::Error;

/// Number of trailing characters the authority discloses and matches on.
pub const SUFFIX_LEN: usize = 4;

/// Errors from code normalisation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The input has fewer than [`SUFFIX_LEN`] significant characters.
    #[error("code must contain at least {SUFFIX_LEN} significant characters")]
    InvalidFormat,
}

/// The last [`SUFFIX_LEN`] characters of a canonical code.
///
/// Only constructible through [`normalize`], so a value of this type is
/// always exactly [`SUFFIX_LEN`] uppercase characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardSuffix(String);

impl CardSuffix {
    /// The suffix as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A gift-card code reduced to its canonical search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCode {
    canonical: String,
    suffix: CardSuffix,
}

impl NormalizedCode {
    /// The full canonical code: uppercased, without whitespace or hyphens.
    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The trailing characters the authority will match on.
    #[must_use]
    pub fn suffix(&self) -> &CardSuffix {
        &self.suffix
    }
}

/// Normalise raw customer input into a [`NormalizedCode`].
///
/// Strips all whitespace and hyphens and uppercases the rest. The suffix is
/// the last [`SUFFIX_LEN`] characters of the canonical form, counted in
/// characters rather than bytes.
///
/// Normalisation is idempotent: feeding a canonical code back in yields the
/// same result.
///
/// # Errors
///
/// Returns [`CodeError::InvalidFormat`] when fewer than [`SUFFIX_LEN`]
/// significant characters remain.
pub fn normalize(raw: &str) -> Result<NormalizedCode, CodeError> {
    let canonical: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .collect();

    let count = canonical.chars().count();

    if count < SUFFIX_LEN {
        return Err(CodeError::InvalidFormat);
    }

    let suffix: String = canonical.chars().skip(count - SUFFIX_LEN).collect();

    Ok(NormalizedCode {
        canonical,
        suffix: CardSuffix(suffix),
    })
}
