//! Per-row scoring output.

use crate::{Category, Transaction};
use serde::{Deserialize, Serialize};

/// A transaction enriched with earned vs. optimal points.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredTransaction {
    pub transaction: Transaction,
    /// Canonical name of the card actually used
    pub card: String,
    pub category: Category,
    pub used_rate: f64,
    pub best_rate: f64,
    /// Every card tied at `best_rate`, in config order
    pub best_cards: Vec<String>,
    pub points_earned: f64,
    pub optimal_points: f64,
    pub missed_points: f64,
    pub used_best_card: bool,
    pub override_applied: bool,
    pub override_reason: Option<String>,
}

impl ScoredTransaction {
    pub fn amount(&self) -> f64 {
        self.transaction.amount
    }

    /// Best cards joined for display ("A / B").
    pub fn best_cards_label(&self) -> String {
        self.best_cards.join(" / ")
    }
}

/// Round to cents, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
