//! Best card per category, from the advertised earn tables alone.

use crate::rule_store::RuleStore;
use pointpilot_core::Category;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestCardRow {
    pub category: Category,
    pub rate: f64,
    pub cards: Vec<String>,
    /// True when a best card only earns `rate` at specific merchants
    pub conditional: bool,
}

/// One row per canonical category except `Other`, in category order.
pub fn best_cards_by_category(store: &RuleStore) -> Vec<BestCardRow> {
    Category::ALL
        .iter()
        .copied()
        .filter(|c| !c.is_catch_all())
        .map(|category| {
            let rates: Vec<f64> = (0..store.card_count())
                .map(|idx| store.table_rate(idx, category))
                .collect();
            let rate = rates.iter().copied().fold(f64::MIN, f64::max);
            let best: Vec<usize> = rates
                .iter()
                .enumerate()
                .filter(|(_, r)| **r == rate)
                .map(|(idx, _)| idx)
                .collect();
            BestCardRow {
                category,
                rate,
                conditional: best.iter().any(|idx| store.is_conditional(*idx, category)),
                cards: best.iter().map(|idx| store.card_name(*idx).to_string()).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointpilot_core::{CardProfile, ScoringConfig};

    #[test]
    fn test_best_rows() {
        let cfg = ScoringConfig::new(
            vec![
                CardProfile::new("Sapphire")
                    .with_reward(Category::Dining, 3.0)
                    .with_reward(Category::Travel, 5.0)
                    .with_conditional(Category::Travel, &["chase travel"], 2.0),
                CardProfile::new("Unlimited")
                    .with_base_rate(1.5)
                    .with_reward(Category::Dining, 3.0),
            ],
            vec![],
        )
        .unwrap();
        let rows = best_cards_by_category(&RuleStore::new(&cfg));

        assert_eq!(rows.len(), Category::ALL.len() - 1);
        assert!(rows.iter().all(|r| r.category != Category::Other));

        let dining = rows.iter().find(|r| r.category == Category::Dining).unwrap();
        assert_eq!(dining.rate, 3.0);
        assert_eq!(dining.cards, vec!["Sapphire".to_string(), "Unlimited".to_string()]);
        assert!(!dining.conditional);

        let travel = rows.iter().find(|r| r.category == Category::Travel).unwrap();
        assert_eq!(travel.cards, vec!["Sapphire".to_string()]);
        assert!(travel.conditional);

        let gas = rows.iter().find(|r| r.category == Category::Gas).unwrap();
        assert_eq!(gas.rate, 1.5);
        assert_eq!(gas.cards, vec!["Unlimited".to_string()]);
    }
}
