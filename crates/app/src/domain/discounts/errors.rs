//! Discounts service errors.

use thiserror::Error;

use ribbon::amounts::AmountError;

use crate::{authority::AuthorityError, domain::cards::CardsServiceError};

/// Errors from converting a balance into a discount credential.
#[derive(Debug, Error)]
pub enum DiscountsServiceError {
    /// Verification failed before any mint was attempted.
    #[error(transparent)]
    Cards(#[from] CardsServiceError),

    /// The discount amount came out non-positive.
    #[error("invalid discount amount")]
    InvalidAmount(#[from] AmountError),

    /// The authority refused to mint the discount.
    #[error("could not create discount: {message}")]
    Rejected {
        /// The authority's own description of the refusal.
        message: String,
    },

    /// The mint failed in transport or returned an unexpected shape.
    #[error("authority error")]
    Authority(#[source] AuthorityError),
}
