//! Cards service models.

use ribbon::cards::CardCandidate;

/// The card the trust policy selected for a customer-supplied code.
///
/// Produced fresh for every request and never stored; the balance it carries
/// is only as current as the lookup that produced it.
#[derive(Debug, Clone)]
pub struct VerifiedCard {
    /// The selected candidate, with its disclosed balance.
    pub candidate: CardCandidate,
}
