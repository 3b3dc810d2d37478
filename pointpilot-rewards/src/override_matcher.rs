//! First-match merchant override lookup.

use pointpilot_core::{Category, OverrideRule};

/// Replacement fields from the winning rule.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideResult {
    pub rule_index: usize,
    pub pattern: String,
    pub category: Option<Category>,
    pub preferred_card: Option<String>,
    pub multiplier: Option<f64>,
    pub reason: String,
}

/// Scan rules in declaration order; the first rule with any pattern
/// contained in the lower-cased merchant text wins. Rules never combine.
pub fn match_override(merchant_text: &str, rules: &[OverrideRule]) -> Option<OverrideResult> {
    let merchant = merchant_text.to_lowercase();
    if merchant.trim().is_empty() {
        return None;
    }

    rules.iter().enumerate().find_map(|(rule_index, rule)| {
        rule.matched_pattern(&merchant).map(|pattern| OverrideResult {
            rule_index,
            pattern: pattern.to_string(),
            category: rule.category,
            preferred_card: rule.preferred_card.clone(),
            multiplier: rule.multiplier,
            reason: rule
                .reason
                .clone()
                .unwrap_or_else(|| format!("merchant matched \"{}\"", pattern)),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<OverrideRule> {
        vec![
            OverrideRule::new(&["chase travel"])
                .with_category(Category::Travel)
                .with_card("Sapphire", 5.0)
                .with_reason("Chase Travel portal"),
            OverrideRule::new(&["american airlines", "aa.com"])
                .with_category(Category::Travel)
                .with_card("AAdvantage", 2.0),
            OverrideRule::new(&["travel"]).with_category(Category::Travel),
        ]
    }

    #[test]
    fn test_first_declared_rule_wins() {
        // "chase travel" also contains "travel" (rule 2); rule 0 is first.
        let hit = match_override("CHASE TRAVEL PORTAL", &rules()).unwrap();
        assert_eq!(hit.rule_index, 0);
        assert_eq!(hit.preferred_card.as_deref(), Some("Sapphire"));
        assert_eq!(hit.multiplier, Some(5.0));
        assert_eq!(hit.reason, "Chase Travel portal");
    }

    #[test]
    fn test_any_pattern_matches() {
        let hit = match_override("www.AA.com booking", &rules()).unwrap();
        assert_eq!(hit.rule_index, 1);
        assert_eq!(hit.pattern, "aa.com");
        assert_eq!(hit.reason, "merchant matched \"aa.com\"");
    }

    #[test]
    fn test_category_only_rule() {
        let hit = match_override("Generic Travel Agency", &rules()).unwrap();
        assert_eq!(hit.rule_index, 2);
        assert_eq!(hit.category, Some(Category::Travel));
        assert!(hit.multiplier.is_none());
        assert!(hit.preferred_card.is_none());
    }

    #[test]
    fn test_no_match() {
        assert!(match_override("Starbucks", &rules()).is_none());
        assert!(match_override("", &rules()).is_none());
        assert!(match_override("chase travel", &[]).is_none());
    }
}
