//! Cards service errors.

use thiserror::Error;

use ribbon::codes::CardSuffix;

use crate::{authority::AuthorityError, sessions::SessionsRepositoryError};

/// Errors from card verification.
#[derive(Debug, Error)]
pub enum CardsServiceError {
    /// No stored offline session grants access to the shop's authority.
    #[error("no offline session stored for the shop")]
    TenantUnresolved,

    /// No enabled, funded candidate matched the suffix.
    #[error("no card matched suffix {suffix} ({scanned} candidates scanned)")]
    NotFound {
        /// The suffix that was searched for.
        suffix: CardSuffix,

        /// How many candidates the authority returned for it.
        scanned: usize,
    },

    /// The session store failed.
    #[error("session store error")]
    Sessions(#[from] SessionsRepositoryError),

    /// The authority failed or answered with an unexpected shape.
    #[error("authority error")]
    Authority(#[from] AuthorityError),
}
