//! In-memory (card, category) -> multiplier table.

use pointpilot_core::{CardProfile, Category, ScoringConfig};
use std::collections::HashMap;

/// Built once per run from the card profiles; read-only afterwards.
#[derive(Debug, Clone)]
pub struct RuleStore {
    cards: Vec<CardProfile>,
    rates: HashMap<(usize, Category), f64>,
}

impl RuleStore {
    pub fn new(config: &ScoringConfig) -> Self {
        let mut rates = HashMap::new();
        for (idx, card) in config.cards.iter().enumerate() {
            for (cat, rate) in &card.rewards {
                rates.insert((idx, *cat), *rate);
            }
        }
        Self {
            cards: config.cards.clone(),
            rates,
        }
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn card_name(&self, idx: usize) -> &str {
        &self.cards[idx].name
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Advertised multiplier with no merchant context; base rate when the
    /// category has no entry.
    pub fn table_rate(&self, idx: usize, category: Category) -> f64 {
        self.rates
            .get(&(idx, category))
            .copied()
            .unwrap_or(self.cards[idx].base_rate)
    }

    /// Multiplier this card earns at this merchant. Portal/carrier-only
    /// bonuses are capped to the card's fallback rate elsewhere.
    pub fn rate(&self, idx: usize, category: Category, merchant_lower: &str) -> f64 {
        let table = self.table_rate(idx, category);
        match self.cards[idx].conditional_for(category) {
            Some(cond) if !cond.merchant_qualifies(merchant_lower) => table.min(cond.fallback_rate),
            _ => table,
        }
    }

    pub fn is_conditional(&self, idx: usize, category: Category) -> bool {
        self.cards[idx].conditional_for(category).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RuleStore {
        let cfg = ScoringConfig::new(
            vec![
                CardProfile::new("Sapphire")
                    .with_reward(Category::Dining, 3.0)
                    .with_reward(Category::Travel, 5.0)
                    .with_conditional(Category::Travel, &["chase travel"], 2.0),
                CardProfile::new("Unlimited").with_base_rate(1.5),
            ],
            vec![],
        )
        .unwrap();
        RuleStore::new(&cfg)
    }

    #[test]
    fn test_lookup_and_base_fallback() {
        let s = store();
        assert_eq!(s.table_rate(0, Category::Dining), 3.0);
        assert_eq!(s.table_rate(0, Category::Gas), 1.0);
        assert_eq!(s.table_rate(1, Category::Dining), 1.5);
        assert_eq!(s.index_of("unlimited"), Some(1));
        assert_eq!(s.index_of("nope"), None);
    }

    #[test]
    fn test_conditional_rate_capped_off_portal() {
        let s = store();
        assert_eq!(s.rate(0, Category::Travel, "chase travel portal"), 5.0);
        assert_eq!(s.rate(0, Category::Travel, "delta air lines"), 2.0);
        // Unconditional categories are untouched by merchant text.
        assert_eq!(s.rate(0, Category::Dining, "delta air lines"), 3.0);
    }

    #[test]
    fn test_fallback_never_raises_rate() {
        let cfg = ScoringConfig::new(
            vec![
                CardProfile::new("Low")
                    .with_reward(Category::TransitTolls, 1.0)
                    .with_conditional(Category::TransitTolls, &["ezpass"], 3.0),
            ],
            vec![],
        )
        .unwrap();
        let s = RuleStore::new(&cfg);
        assert_eq!(s.rate(0, Category::TransitTolls, "metro"), 1.0);
    }
}
