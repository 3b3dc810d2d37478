//! Scoring engine: resolves card and category, applies overrides, and
//! computes earned vs. optimal points for each transaction.

use crate::eligibility::{Eligibility, EligibilityFilter, ExclusionReason};
use crate::normalizer::normalize;
use crate::override_matcher::{OverrideResult, match_override};
use crate::resolver::{AccountMatch, CardResolver};
use crate::rule_store::RuleStore;
use pointpilot_core::{Category, OverrideRule, ScoredTransaction, ScoringConfig, Transaction, round2};
use tracing::{debug, info};

/// Tolerance for treating two multipliers as tied.
const RATE_EPSILON: f64 = 1e-9;

/// Why a row never reached scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exclusion {
    /// Account label is a non-credit account (checking, savings, ...)
    NonCreditAccount(String),
    /// Account label matches no configured card
    UnrecognizedAccount,
    Ineligible(ExclusionReason),
}

/// Rows dropped during a batch, by cause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub non_credit_account: usize,
    pub unrecognized_account: usize,
    pub ineligible: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.non_credit_account + self.unrecognized_account + self.ineligible
    }

    fn record(&mut self, exclusion: &Exclusion) {
        match exclusion {
            Exclusion::NonCreditAccount(_) => self.non_credit_account += 1,
            Exclusion::UnrecognizedAccount => self.unrecognized_account += 1,
            Exclusion::Ineligible(_) => self.ineligible += 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub scored: Vec<ScoredTransaction>,
    pub dropped: DropCounts,
}

/// Read-only scoring context built from one `ScoringConfig`.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    store: RuleStore,
    resolver: CardResolver,
    filter: EligibilityFilter,
    overrides: Vec<OverrideRule>,
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            store: RuleStore::new(config),
            resolver: CardResolver::new(config),
            filter: EligibilityFilter::new(&config.eligibility),
            overrides: config.overrides.clone(),
        }
    }

    pub fn rule_store(&self) -> &RuleStore {
        &self.store
    }

    /// Score one transaction, or report why it is excluded.
    pub fn score(&self, txn: &Transaction) -> Result<ScoredTransaction, Exclusion> {
        let used = match self.resolver.classify(&txn.account) {
            AccountMatch::Card(idx) => idx,
            AccountMatch::Excluded(kw) => return Err(Exclusion::NonCreditAccount(kw)),
            AccountMatch::Unrecognized => return Err(Exclusion::UnrecognizedAccount),
        };

        if let Eligibility::Excluded(reason) = self.filter.check(txn) {
            return Err(Exclusion::Ineligible(reason));
        }

        let merchant = txn.merchant_key();
        let mut category = normalize(&txn.raw_category, &txn.merchant);

        let ov = match_override(&txn.merchant, &self.overrides);
        if let Some(c) = ov.as_ref().and_then(|o| o.category) {
            category = c;
        }

        let used_rate = self.effective_rate(used, used, category, &merchant, ov.as_ref());

        let rates: Vec<f64> = (0..self.store.card_count())
            .map(|idx| self.effective_rate(idx, used, category, &merchant, ov.as_ref()))
            .collect();
        let best_rate = rates.iter().copied().fold(f64::MIN, f64::max);
        let best_idx: Vec<usize> = rates
            .iter()
            .enumerate()
            .filter(|(_, r)| (best_rate - **r).abs() < RATE_EPSILON)
            .map(|(idx, _)| idx)
            .collect();

        let points_earned = round2(txn.amount * used_rate);
        let optimal_points = round2(txn.amount * best_rate);
        let missed_points = round2(optimal_points - points_earned).max(0.0);

        Ok(ScoredTransaction {
            transaction: txn.clone(),
            card: self.store.card_name(used).to_string(),
            category,
            used_rate,
            best_rate,
            best_cards: best_idx
                .iter()
                .map(|idx| self.store.card_name(*idx).to_string())
                .collect(),
            points_earned,
            optimal_points,
            missed_points,
            used_best_card: best_idx.contains(&used),
            override_applied: ov.is_some(),
            override_reason: ov.map(|o| o.reason),
        })
    }

    /// Multiplier `card` would earn on this transaction.
    ///
    /// An override multiplier replaces the rate of its preferred card, or of
    /// the card actually used when the rule names no card. A preferred card
    /// without a multiplier earns its uncapped table rate. Every other card
    /// gets its table rate with conditional capping applied.
    fn effective_rate(
        &self,
        card: usize,
        used: usize,
        category: Category,
        merchant_lower: &str,
        ov: Option<&OverrideResult>,
    ) -> f64 {
        if let Some(ov) = ov {
            let preferred = ov
                .preferred_card
                .as_deref()
                .and_then(|name| self.store.index_of(name));
            match (preferred, ov.multiplier) {
                (Some(p), Some(m)) if p == card => return m,
                (None, Some(m)) if card == used => return m,
                (Some(p), None) if p == card => return self.store.table_rate(card, category),
                _ => {}
            }
        }
        self.store.rate(card, category, merchant_lower)
    }

    /// Score every row in order, dropping excluded rows and counting why.
    pub fn score_batch(&self, txns: &[Transaction]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for txn in txns {
            match self.score(txn) {
                Ok(s) => outcome.scored.push(s),
                Err(e) => {
                    debug!(merchant = %txn.merchant, account = %txn.account, reason = ?e, "excluded row");
                    outcome.dropped.record(&e);
                }
            }
        }
        log_outcome(&outcome);
        outcome
    }

    /// Same result as `score_batch`, with rows scored across threads.
    #[cfg(feature = "parallel")]
    pub fn score_batch_parallel(&self, txns: &[Transaction]) -> BatchOutcome {
        use rayon::prelude::*;

        let results: Vec<Result<ScoredTransaction, Exclusion>> =
            txns.par_iter().map(|t| self.score(t)).collect();

        let mut outcome = BatchOutcome::default();
        for r in results {
            match r {
                Ok(s) => outcome.scored.push(s),
                Err(e) => outcome.dropped.record(&e),
            }
        }
        log_outcome(&outcome);
        outcome
    }
}

fn log_outcome(outcome: &BatchOutcome) {
    info!(
        scored = outcome.scored.len(),
        non_credit = outcome.dropped.non_credit_account,
        unrecognized = outcome.dropped.unrecognized_account,
        ineligible = outcome.dropped.ineligible,
        "scored batch"
    );
}
