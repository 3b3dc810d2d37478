//! Plain-language insights generated from scored output.
//!
//! Optional report layer; nothing in the scoring path depends on it.

use crate::aggregate::{Totals, summarize_by_card, top_missed_categories};
use pointpilot_core::ScoredTransaction;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Optimal,
    Missed,
    Category,
    Card,
    Redemption,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub merchant: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct InsightOptions {
    /// Emit one insight per transaction
    pub per_transaction: bool,
    /// How many least-optimized categories to call out
    pub weakest_categories: usize,
    /// Currency value of one point
    pub point_value: f64,
    /// Optimal-points total above which a redemption hint is added
    pub redemption_threshold: f64,
}

impl Default for InsightOptions {
    fn default() -> Self {
        Self {
            per_transaction: true,
            weakest_categories: 2,
            point_value: 0.015,
            redemption_threshold: 10_000.0,
        }
    }
}

fn insight(kind: InsightKind, merchant: Option<&str>, message: String) -> Insight {
    Insight {
        kind,
        merchant: merchant.map(|m| m.to_string()),
        message,
    }
}

pub fn generate_insights(scored: &[ScoredTransaction], opts: &InsightOptions) -> Vec<Insight> {
    let mut out = Vec::new();

    if opts.per_transaction {
        for s in scored {
            let merchant = s.transaction.merchant.as_str();
            if s.used_best_card {
                out.push(insight(
                    InsightKind::Optimal,
                    Some(merchant),
                    format!("You used the best card ({}) at {}.", s.card, merchant),
                ));
            } else {
                out.push(insight(
                    InsightKind::Missed,
                    Some(merchant),
                    format!(
                        "You used {} at {}, but {} would have earned {:.1} more points ({:.1} vs {:.1}).",
                        s.card,
                        merchant,
                        s.best_cards_label(),
                        s.missed_points,
                        s.optimal_points,
                        s.points_earned
                    ),
                ));
            }
        }
    }

    // Least-optimized categories with something actually left on the table.
    let mut categories = top_missed_categories(scored);
    categories.retain(|c| c.missed_points > 0.0);
    categories.sort_by(|a, b| a.optimization_rate.total_cmp(&b.optimization_rate));
    for c in categories.iter().take(opts.weakest_categories) {
        out.push(insight(
            InsightKind::Category,
            None,
            format!(
                "You're missing points in {}: about {:.0} points left on the table.",
                c.category, c.missed_points
            ),
        ));
    }

    let cards = summarize_by_card(scored);
    // First card wins ties on both ends.
    let best = cards.iter().reduce(|acc, c| {
        if c.optimization_rate > acc.optimization_rate { c } else { acc }
    });
    let worst = cards.iter().reduce(|acc, c| {
        if c.optimization_rate < acc.optimization_rate { c } else { acc }
    });
    if let Some(best) = best {
        out.push(insight(
            InsightKind::Card,
            None,
            format!(
                "Your {} is performing best overall ({:.1}% optimized).",
                best.card, best.optimization_rate
            ),
        ));
    }
    if let (Some(best), Some(worst)) = (best, worst) {
        if worst.optimization_rate < best.optimization_rate && worst.missed_points > 0.0 {
            out.push(insight(
                InsightKind::Card,
                None,
                format!(
                    "Consider reviewing your {} usage ({:.1}% optimized).",
                    worst.card, worst.optimization_rate
                ),
            ));
        }
    }

    let total_optimal = Totals::from_scored(scored).optimal_points;
    if total_optimal > opts.redemption_threshold {
        out.push(insight(
            InsightKind::Redemption,
            None,
            format!(
                "Your spend could earn {:.0} points, worth about ${:.2} at {:.1} cents per point.",
                total_optimal,
                total_optimal * opts.point_value,
                opts.point_value * 100.0
            ),
        ));
    }

    out
}
