//! Property-based tests for the tier table.

use proptest::prelude::*;
use wlx_tier::{rule_for, tier_for, CONTACT_SUPPORT, TIER_RULES};

proptest! {
    /// Property: every amount inside a closed rule gets that rule's label.
    #[test]
    fn prop_closed_rule_amounts_match(
        index in 0..TIER_RULES.len() - 1,
        fraction in 0.0f64..=1.0,
    ) {
        let rule = &TIER_RULES[index];
        let high = rule.high.expect("closed rule");
        let amount = rule.low + (high - rule.low) * fraction;

        prop_assert_eq!(tier_for(amount), rule.label);
    }

    /// Property: anything above the top threshold is in the top tier.
    #[test]
    fn prop_top_tier(extra in 1u64..1_000_000_000_000) {
        prop_assert_eq!(tier_for(400_000.0 + extra as f64), "548+ XLM");
    }

    /// Property: amounts below the first rule never get a tier.
    #[test]
    fn prop_below_minimum(amount in 0.0f64..200.0) {
        prop_assert_eq!(tier_for(amount), CONTACT_SUPPORT);
    }

    /// Property: the 200000..240000 gap is uncovered.
    #[test]
    fn prop_upper_gap(amount in 200_000.0001f64..239_999.9999) {
        prop_assert_eq!(tier_for(amount), CONTACT_SUPPORT);
    }

    /// Property: lookups are deterministic.
    #[test]
    fn prop_deterministic(amount in any::<f64>()) {
        prop_assert_eq!(tier_for(amount), tier_for(amount));
    }

    /// Property: the label always comes from the table or is the fallback.
    #[test]
    fn prop_label_from_table(amount in any::<f64>()) {
        let label = tier_for(amount);
        match rule_for(amount) {
            Some(rule) => prop_assert_eq!(label, rule.label),
            None => prop_assert_eq!(label, CONTACT_SUPPORT),
        }
    }
}
