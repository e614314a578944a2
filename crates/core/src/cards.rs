//! Card candidates and the suffix-match trust policy.

use rust_decimal::Decimal;

use crate::codes::CardSuffix;

/// One gift-card record the authority returned for a suffix query.
///
/// The authority never discloses the full code, so a candidate is identified
/// only by its stored suffix, which is not unique across cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCandidate {
    /// Authority-assigned identifier for the card record.
    pub external_id: String,

    /// The trailing characters the authority disclosed for this card.
    pub suffix: String,

    /// Whether the card is currently redeemable.
    pub enabled: bool,

    /// Remaining balance on the card.
    pub balance: Decimal,

    /// Currency of the balance, as reported by the authority.
    pub currency: String,
}

/// Select the candidate to trust for the given suffix.
///
/// Candidates survive filtering when they are enabled, carry a positive
/// balance and their stored suffix equals the queried one (re-checked here
/// even though the authority query already filtered server-side).
///
/// Because the full code is never disclosed, two funded cards sharing a
/// suffix cannot be told apart. When several candidates survive, the first
/// one in the order the authority returned them is selected. The resulting
/// false-acceptance risk is a known, accepted limitation.
pub fn select_card<'a>(
    candidates: &'a [CardCandidate],
    suffix: &CardSuffix,
) -> Option<&'a CardCandidate> {
    candidates.iter().find(|candidate| {
        candidate.enabled && candidate.balance > Decimal::ZERO && candidate.suffix == suffix.as_str()
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::codes::normalize;

    use super::*;

    fn candidate(id: &str, suffix: &str, enabled: bool, balance: Decimal) -> CardCandidate {
        CardCandidate {
            external_id: id.to_string(),
            suffix: suffix.to_string(),
            enabled,
            balance,
            currency: "GBP".to_string(),
        }
    }

    fn suffix_of(code: &str) -> TestResult<CardSuffix> {
        Ok(normalize(code)?.suffix().clone())
    }

    #[test]
    fn select_card_returns_the_single_surviving_candidate() -> TestResult {
        let suffix = suffix_of("ab-1234 ab12")?;
        let candidates = [candidate("card/1", "AB12", true, Decimal::new(2500, 2))];

        let selected = select_card(&candidates, &suffix);

        assert_eq!(
            selected.map(|c| c.balance),
            Some(Decimal::new(2500, 2)),
            "the single enabled, funded candidate should be selected"
        );

        Ok(())
    }

    #[test]
    fn select_card_returns_none_for_empty_candidate_list() -> TestResult {
        let suffix = suffix_of("ZZ99")?;

        assert_eq!(select_card(&[], &suffix), None);

        Ok(())
    }

    #[test]
    fn select_card_never_selects_disabled_or_unfunded_candidates() -> TestResult {
        let suffix = suffix_of("CD34")?;
        let candidates = [
            candidate("card/1", "CD34", false, Decimal::new(5000, 2)),
            candidate("card/2", "CD34", true, Decimal::ZERO),
            candidate("card/3", "CD34", true, Decimal::new(-100, 2)),
        ];

        assert_eq!(
            select_card(&candidates, &suffix),
            None,
            "disabled and non-positive-balance candidates must never match"
        );

        Ok(())
    }

    #[test]
    fn select_card_rechecks_the_stored_suffix() -> TestResult {
        let suffix = suffix_of("CD34")?;
        let candidates = [candidate("card/1", "XX99", true, Decimal::new(1000, 2))];

        assert_eq!(
            select_card(&candidates, &suffix),
            None,
            "a candidate whose stored suffix differs must be filtered out"
        );

        Ok(())
    }

    #[test]
    fn select_card_prefers_the_first_candidate_in_authority_order() -> TestResult {
        let suffix = suffix_of("CD34")?;
        let candidates = [
            candidate("card/1", "CD34", true, Decimal::new(1000, 2)),
            candidate("card/2", "CD34", true, Decimal::new(9000, 2)),
        ];

        for _ in 0..3 {
            let selected = select_card(&candidates, &suffix);

            assert_eq!(
                selected.map(|c| c.external_id.as_str()),
                Some("card/1"),
                "selection must be stable across repeated calls"
            );
        }

        Ok(())
    }

    #[test]
    fn select_card_skips_non_survivors_ahead_of_the_match() -> TestResult {
        let suffix = suffix_of("CD34")?;
        let candidates = [
            candidate("card/1", "CD34", false, Decimal::new(1000, 2)),
            candidate("card/2", "CD34", true, Decimal::new(750, 2)),
        ];

        let selected = select_card(&candidates, &suffix);

        assert_eq!(selected.map(|c| c.external_id.as_str()), Some("card/2"));

        Ok(())
    }
}
