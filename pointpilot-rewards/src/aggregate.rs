//! Roll scored rows up into per-card and per-category summaries.
//!
//! `Totals` is an associative, commutative accumulator, so shards scored
//! independently can be merged in any order.

use pointpilot_core::{Category, ScoredTransaction, round2};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub transactions: usize,
    pub total_spend: f64,
    pub points_earned: f64,
    pub optimal_points: f64,
    pub missed_points: f64,
}

impl Totals {
    pub fn add(&mut self, s: &ScoredTransaction) {
        self.transactions += 1;
        self.total_spend += s.amount();
        self.points_earned += s.points_earned;
        self.optimal_points += s.optimal_points;
        self.missed_points += s.missed_points;
    }

    pub fn merge(mut self, other: Totals) -> Totals {
        self.transactions += other.transactions;
        self.total_spend += other.total_spend;
        self.points_earned += other.points_earned;
        self.optimal_points += other.optimal_points;
        self.missed_points += other.missed_points;
        self
    }

    pub fn from_scored<'a>(rows: impl IntoIterator<Item = &'a ScoredTransaction>) -> Totals {
        let mut t = Totals::default();
        for s in rows {
            t.add(s);
        }
        t
    }

    /// earned / (earned + missed) as a percentage; 0 when nothing was earnable.
    pub fn optimization_rate(&self) -> f64 {
        let denom = self.points_earned + self.missed_points;
        if denom > 0.0 {
            self.points_earned / denom * 100.0
        } else {
            0.0
        }
    }

    fn rounded(self) -> Totals {
        Totals {
            transactions: self.transactions,
            total_spend: round2(self.total_spend),
            points_earned: round2(self.points_earned),
            optimal_points: round2(self.optimal_points),
            missed_points: round2(self.missed_points),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub card: String,
    pub transactions: usize,
    pub total_spend: f64,
    pub points_earned: f64,
    pub optimal_points: f64,
    pub missed_points: f64,
    pub optimization_rate: f64,
}

impl CardSummary {
    fn from_totals(card: String, t: Totals) -> Self {
        let t = t.rounded();
        Self {
            card,
            transactions: t.transactions,
            total_spend: t.total_spend,
            points_earned: t.points_earned,
            optimal_points: t.optimal_points,
            missed_points: t.missed_points,
            optimization_rate: round2(t.optimization_rate()),
        }
    }

    /// Currency value of earned points at `point_value` per point.
    pub fn earned_value(&self, point_value: f64) -> f64 {
        round2(self.points_earned * point_value)
    }

    pub fn missed_value(&self, point_value: f64) -> f64 {
        round2(self.missed_points * point_value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub transactions: usize,
    pub total_spend: f64,
    pub points_earned: f64,
    pub optimal_points: f64,
    pub missed_points: f64,
    pub optimization_rate: f64,
}

impl CategorySummary {
    fn from_totals(category: Category, t: Totals) -> Self {
        let t = t.rounded();
        Self {
            category,
            transactions: t.transactions,
            total_spend: t.total_spend,
            points_earned: t.points_earned,
            optimal_points: t.optimal_points,
            missed_points: t.missed_points,
            optimization_rate: round2(t.optimization_rate()),
        }
    }
}

/// Per-card summaries, highest points earned first (ties by name).
pub fn summarize_by_card(scored: &[ScoredTransaction]) -> Vec<CardSummary> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();
    for s in scored {
        groups.entry(s.card.as_str()).or_default().add(s);
    }

    let mut out: Vec<CardSummary> = groups
        .into_iter()
        .map(|(card, t)| CardSummary::from_totals(card.to_string(), t))
        .collect();
    out.sort_by(|a, b| {
        b.points_earned
            .total_cmp(&a.points_earned)
            .then_with(|| a.card.cmp(&b.card))
    });
    out
}

fn category_groups(scored: &[ScoredTransaction]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<Category, Totals> = BTreeMap::new();
    for s in scored {
        groups.entry(s.category).or_default().add(s);
    }
    groups
        .into_iter()
        .map(|(c, t)| CategorySummary::from_totals(c, t))
        .collect()
}

/// Per-category summaries, highest points earned first.
pub fn summarize_by_category(scored: &[ScoredTransaction]) -> Vec<CategorySummary> {
    let mut out = category_groups(scored);
    out.sort_by(|a, b| {
        b.points_earned
            .total_cmp(&a.points_earned)
            .then_with(|| a.category.cmp(&b.category))
    });
    out
}

/// Per-category summaries, most missed points first.
pub fn top_missed_categories(scored: &[ScoredTransaction]) -> Vec<CategorySummary> {
    let mut out = category_groups(scored);
    out.sort_by(|a, b| {
        b.missed_points
            .total_cmp(&a.missed_points)
            .then_with(|| a.category.cmp(&b.category))
    });
    out
}

/// Headline numbers across the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub transactions: usize,
    pub total_spend: f64,
    pub points_earned: f64,
    pub optimal_points: f64,
    pub missed_points: f64,
    pub optimization_rate: f64,
    pub points_per_dollar: f64,
    pub optimal_points_per_dollar: f64,
    pub used_best_card: usize,
}

impl Overview {
    pub fn from_scored(scored: &[ScoredTransaction]) -> Self {
        let t = Totals::from_scored(scored);
        let per_dollar = |points: f64| {
            if t.total_spend > 0.0 {
                round2(points / t.total_spend)
            } else {
                0.0
            }
        };
        Self {
            transactions: t.transactions,
            total_spend: round2(t.total_spend),
            points_earned: round2(t.points_earned),
            optimal_points: round2(t.optimal_points),
            missed_points: round2(t.missed_points),
            optimization_rate: round2(t.optimization_rate()),
            points_per_dollar: per_dollar(t.points_earned),
            optimal_points_per_dollar: per_dollar(t.optimal_points),
            used_best_card: scored.iter().filter(|s| s.used_best_card).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointpilot_core::Transaction;

    fn row(card: &str, category: Category, amount: f64, used: f64, best: f64) -> ScoredTransaction {
        let earned = round2(amount * used);
        let optimal = round2(amount * best);
        ScoredTransaction {
            transaction: Transaction::new("m", amount),
            card: card.to_string(),
            category,
            used_rate: used,
            best_rate: best,
            best_cards: vec![],
            points_earned: earned,
            optimal_points: optimal,
            missed_points: (optimal - earned).max(0.0),
            used_best_card: used == best,
            override_applied: false,
            override_reason: None,
        }
    }

    fn sample() -> Vec<ScoredTransaction> {
        vec![
            row("A", Category::Dining, 50.0, 3.0, 3.0),
            row("B", Category::Dining, 50.0, 1.0, 3.0),
            row("B", Category::Gas, 20.0, 1.0, 2.0),
            row("A", Category::Travel, 120.0, 2.0, 2.0),
        ]
    }

    #[test]
    fn test_card_summary() {
        let cards = summarize_by_card(&sample());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].card, "A");
        assert_eq!(cards[0].transactions, 2);
        assert_eq!(cards[0].total_spend, 170.0);
        assert_eq!(cards[0].points_earned, 390.0);
        assert_eq!(cards[0].optimization_rate, 100.0);

        let b = &cards[1];
        assert_eq!(b.points_earned, 70.0);
        assert_eq!(b.missed_points, 120.0);
        assert_eq!(b.optimization_rate, round2(70.0 / 190.0 * 100.0));
        assert_eq!(b.missed_value(0.015), 1.8);
    }

    #[test]
    fn test_category_orderings() {
        let by_earned = summarize_by_category(&sample());
        assert_eq!(by_earned[0].category, Category::Travel);
        assert_eq!(by_earned[0].points_earned, 240.0);
        assert_eq!(by_earned[1].category, Category::Dining);

        let by_missed = top_missed_categories(&sample());
        assert_eq!(by_missed[0].category, Category::Dining);
        assert_eq!(by_missed[0].missed_points, 100.0);
        assert_eq!(by_missed.last().unwrap().missed_points, 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize_by_card(&[]).is_empty());
        let o = Overview::from_scored(&[]);
        assert_eq!(o.transactions, 0);
        assert_eq!(o.optimization_rate, 0.0);
        assert_eq!(o.points_per_dollar, 0.0);
    }

    #[test]
    fn test_zero_denominator_rate_is_zero() {
        let rows = vec![row("A", Category::Other, 0.0, 1.0, 1.0)];
        assert_eq!(summarize_by_card(&rows)[0].optimization_rate, 0.0);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let rows = sample();
        let (left, right) = rows.split_at(1);
        let merged = Totals::from_scored(right).merge(Totals::from_scored(left));
        assert_eq!(merged, Totals::from_scored(&rows));
    }

    #[test]
    fn test_overview() {
        let o = Overview::from_scored(&sample());
        assert_eq!(o.transactions, 4);
        assert_eq!(o.total_spend, 240.0);
        assert_eq!(o.points_earned, 460.0);
        assert_eq!(o.optimal_points, 580.0);
        assert_eq!(o.missed_points, 120.0);
        assert_eq!(o.used_best_card, 2);
        assert_eq!(o.points_per_dollar, round2(460.0 / 240.0));
    }
}
