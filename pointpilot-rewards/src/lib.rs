//! pointpilot-rewards: category normalization, card resolution, override
//! matching, reward scoring, and aggregation.

pub mod aggregate;
pub mod best_cards;
pub mod eligibility;
pub mod engine;
pub mod insights;
pub mod normalizer;
pub mod override_matcher;
pub mod resolver;
pub mod rule_store;

pub use aggregate::{
    CardSummary, CategorySummary, Overview, Totals, summarize_by_card, summarize_by_category,
    top_missed_categories,
};
pub use best_cards::{BestCardRow, best_cards_by_category};
pub use eligibility::{Eligibility, EligibilityFilter, ExclusionReason};
pub use engine::{BatchOutcome, DropCounts, Exclusion, ScoringEngine};
pub use insights::{Insight, InsightKind, InsightOptions, generate_insights};
pub use normalizer::normalize;
pub use override_matcher::{OverrideResult, match_override};
pub use resolver::{AccountMatch, CardResolver};
pub use rule_store::RuleStore;
