//! Reward tier lookup for WLX holdings.
//!
//! A holder's WLX balance is mapped to the XLM reward range they qualify for
//! using a fixed, ordered rule table. The first rule that contains the amount
//! wins; amounts no rule covers get [`CONTACT_SUPPORT`].
//!
//! The table is not contiguous. There is a step between 598 and 600, and no
//! rule covers 200000 < amount < 240000. Both are kept as published.

/// Label returned when no tier rule matches the amount.
pub const CONTACT_SUPPORT: &str = "Contact Support";

/// One row of the tier table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRule {
    /// Lower bound of the range.
    pub low: f64,
    /// Inclusive upper bound, or `None` for the open-ended top rule.
    pub high: Option<f64>,
    /// Reward range shown to the holder.
    pub label: &'static str,
}

impl TierRule {
    const fn closed(low: f64, high: f64, label: &'static str) -> Self {
        Self {
            low,
            high: Some(high),
            label,
        }
    }

    const fn above(low: f64, label: &'static str) -> Self {
        Self {
            low,
            high: None,
            label,
        }
    }

    /// Whether `amount` falls inside this rule.
    ///
    /// Closed rules are inclusive on both ends. The open-ended rule is
    /// exclusive of its lower bound, so it only matches amounts strictly
    /// greater than `low`.
    pub fn contains(&self, amount: f64) -> bool {
        match self.high {
            Some(high) => amount >= self.low && amount <= high,
            None => amount > self.low,
        }
    }
}

/// Tier rules in evaluation order.
pub static TIER_RULES: &[TierRule] = &[
    TierRule::closed(200.0, 598.0, "0.274–0.819 XLM"),
    TierRule::closed(600.0, 1998.0, "0.822–2.739 XLM"),
    TierRule::closed(2000.0, 5998.0, "2.740–8.217 XLM"),
    TierRule::closed(6000.0, 19998.0, "8.219–27.397 XLM"),
    TierRule::closed(20000.0, 49998.0, "27.397–68.475 XLM"),
    TierRule::closed(50000.0, 99998.0, "68.475–136.986 XLM"),
    TierRule::closed(100_000.0, 200_000.0, "137–274 XLM"),
    TierRule::closed(240_000.0, 400_000.0, "329–548 XLM"),
    TierRule::above(400_000.0, "548+ XLM"),
];

/// Find the first rule matching `amount`, if any.
pub fn rule_for(amount: f64) -> Option<&'static TierRule> {
    TIER_RULES.iter().find(|rule| rule.contains(amount))
}

/// Reward tier label for a WLX amount.
///
/// Total: amounts outside every rule, negative amounts and NaN all yield
/// [`CONTACT_SUPPORT`].
pub fn tier_for(amount: f64) -> &'static str {
    rule_for(amount).map_or(CONTACT_SUPPORT, |rule| rule.label)
}

/// Like [`tier_for`], but takes the decimal string form Horizon reports.
pub fn tier_for_str(amount: &str) -> &'static str {
    match amount.trim().parse::<f64>() {
        Ok(value) => tier_for(value),
        Err(_) => CONTACT_SUPPORT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        assert_eq!(tier_for(200.0), "0.274–0.819 XLM");
        assert_eq!(tier_for(598.0), "0.274–0.819 XLM");
        assert_eq!(tier_for(2_000_000.0), "548+ XLM");
        assert_eq!(tier_for(150.0), CONTACT_SUPPORT);
    }

    #[test]
    fn test_rule_bounds_inclusive() {
        for rule in TIER_RULES {
            if let Some(high) = rule.high {
                assert_eq!(tier_for(rule.low), rule.label, "low bound {}", rule.low);
                assert_eq!(tier_for(high), rule.label, "high bound {}", high);
                assert_eq!(tier_for((rule.low + high) / 2.0), rule.label);
            }
        }
    }

    #[test]
    fn test_below_minimum() {
        assert_eq!(tier_for(0.0), CONTACT_SUPPORT);
        assert_eq!(tier_for(199.0), CONTACT_SUPPORT);
        assert_eq!(tier_for(199.9999999), CONTACT_SUPPORT);
    }

    #[test]
    fn test_gaps_fall_through() {
        assert_eq!(tier_for(599.0), CONTACT_SUPPORT);
        assert_eq!(tier_for(598.5), CONTACT_SUPPORT);
        assert_eq!(tier_for(1999.0), CONTACT_SUPPORT);
        assert_eq!(tier_for(200_001.0), CONTACT_SUPPORT);
        assert_eq!(tier_for(239_999.0), CONTACT_SUPPORT);
    }

    #[test]
    fn test_top_rule_is_exclusive() {
        assert_eq!(tier_for(400_000.0), "329–548 XLM");
        assert_eq!(tier_for(400_000.0000001), "548+ XLM");
        assert_eq!(tier_for(f64::INFINITY), "548+ XLM");
    }

    #[test]
    fn test_non_finite_and_negative() {
        assert_eq!(tier_for(f64::NAN), CONTACT_SUPPORT);
        assert_eq!(tier_for(-250.0), CONTACT_SUPPORT);
        assert_eq!(tier_for(f64::NEG_INFINITY), CONTACT_SUPPORT);
    }

    #[test]
    fn test_from_horizon_string() {
        assert_eq!(tier_for_str("1500.0000000"), "0.822–2.739 XLM");
        assert_eq!(tier_for_str(" 250000.1234567 "), "329–548 XLM");
        assert_eq!(tier_for_str("not a number"), CONTACT_SUPPORT);
        assert_eq!(tier_for_str(""), CONTACT_SUPPORT);
    }

    #[test]
    fn test_rules_do_not_overlap() {
        for pair in TIER_RULES.windows(2) {
            let high = pair[0].high.expect("only the last rule is open-ended");
            assert!(high <= pair[1].low, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
        assert!(TIER_RULES.last().and_then(|r| r.high).is_none());
    }
}
