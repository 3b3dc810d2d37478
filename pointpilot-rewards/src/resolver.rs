//! Card identity resolution from raw account labels.

use pointpilot_core::ScoringConfig;

/// Outcome of matching one raw account label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountMatch {
    /// Index of the matched card in config order
    Card(usize),
    /// Label hit an exclusion keyword (checking, savings, ...)
    Excluded(String),
    Unrecognized,
}

/// Ordered substring table: for each card in config order, its canonical
/// name followed by its aliases. Exclusion keywords are tested first.
#[derive(Debug, Clone)]
pub struct CardResolver {
    exclusions: Vec<String>,
    needles: Vec<(String, usize)>,
}

impl CardResolver {
    pub fn new(config: &ScoringConfig) -> Self {
        let exclusions = config
            .resolver
            .exclude
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let mut needles = Vec::new();
        for (idx, card) in config.cards.iter().enumerate() {
            let names = std::iter::once(&card.name).chain(card.aliases.iter());
            for name in names {
                let needle = name.trim().to_lowercase();
                if !needle.is_empty() {
                    needles.push((needle, idx));
                }
            }
        }

        Self { exclusions, needles }
    }

    pub fn classify(&self, raw_account_label: &str) -> AccountMatch {
        let label = raw_account_label.trim().to_lowercase();
        if label.is_empty() {
            return AccountMatch::Unrecognized;
        }

        if let Some(kw) = self.exclusions.iter().find(|kw| label.contains(kw.as_str())) {
            return AccountMatch::Excluded(kw.clone());
        }

        self.needles
            .iter()
            .find(|(needle, _)| label.contains(needle.as_str()))
            .map(|(_, idx)| AccountMatch::Card(*idx))
            .unwrap_or(AccountMatch::Unrecognized)
    }

    /// Card index for a label, or `None` if the row must be dropped.
    pub fn resolve(&self, raw_account_label: &str) -> Option<usize> {
        match self.classify(raw_account_label) {
            AccountMatch::Card(idx) => Some(idx),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointpilot_core::CardProfile;

    fn resolver() -> CardResolver {
        let cfg = ScoringConfig::new(
            vec![
                CardProfile::new("Chase Sapphire Preferred").with_alias("sapphire"),
                CardProfile::new("Chase Freedom Unlimited").with_alias("freedom unlimited"),
                CardProfile::new("Chase Freedom Flex").with_alias("freedom"),
                CardProfile::new("Citi AAdvantage Platinum Select")
                    .with_alias("aadvantage")
                    .with_alias("citi aa"),
            ],
            vec![],
        )
        .unwrap();
        CardResolver::new(&cfg)
    }

    #[test]
    fn test_canonical_and_alias_labels() {
        let r = resolver();
        assert_eq!(r.resolve("Chase Sapphire Preferred"), Some(0));
        assert_eq!(r.resolve("SAPPHIRE ...4421"), Some(0));
        assert_eq!(r.resolve("Citi AA Platinum"), Some(3));
        assert_eq!(r.resolve("aadvantage"), Some(3));
    }

    #[test]
    fn test_declaration_order_decides_overlaps() {
        let r = resolver();
        // "freedom unlimited" (card 1) is declared before the looser
        // "freedom" alias of card 2, so it wins.
        assert_eq!(r.resolve("Freedom Unlimited Visa"), Some(1));
        assert_eq!(r.resolve("Freedom Flex"), Some(2));
    }

    #[test]
    fn test_exclusions_checked_before_cards() {
        let r = resolver();
        assert_eq!(
            r.classify("Chase Total Checking"),
            AccountMatch::Excluded("checking".to_string())
        );
        assert_eq!(r.resolve("Sapphire Savings"), None);
        assert_eq!(r.resolve("PayPal Credit"), None);
    }

    #[test]
    fn test_unknown_label_is_never_defaulted() {
        let r = resolver();
        assert_eq!(r.classify("Discover It"), AccountMatch::Unrecognized);
        assert_eq!(r.classify(""), AccountMatch::Unrecognized);
    }
}
