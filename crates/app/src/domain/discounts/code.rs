//! Discount code generation.

use rand::{RngCore, rngs::OsRng};

use ribbon::codes::CardSuffix;

/// Marks gift-card-derived discounts in the authority's code listings.
pub(crate) const DISCOUNT_CODE_PREFIX: &str = "GC";

const DISAMBIGUATOR_LEN: usize = 4;
const DISAMBIGUATOR_RADIX: u32 = 36;

/// Build a fresh discount code for a verified suffix.
///
/// Codes are never checked against existing ones; the random tail is the
/// sole collision mitigation, and 36^4 values per suffix keep repeat draws
/// rare enough for single-use codes.
pub(crate) fn generate_discount_code(suffix: &CardSuffix) -> String {
    let mut rng = OsRng;

    let disambiguator: String = (0..DISAMBIGUATOR_LEN)
        .map(|_| {
            let index = rng.next_u32() % DISAMBIGUATOR_RADIX;

            char::from_digit(index, DISAMBIGUATOR_RADIX)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('0')
        })
        .collect();

    format!("{DISCOUNT_CODE_PREFIX}-{suffix}-{disambiguator}")
}
