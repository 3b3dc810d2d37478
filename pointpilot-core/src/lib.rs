//! pointpilot-core: data model for reward-optimization scoring

pub mod card;
pub mod category;
pub mod config;
pub mod overrides;
pub mod scored;
pub mod transaction;

pub use card::{CardProfile, ConditionalRate};
pub use category::Category;
pub use config::{ConfigError, EligibilitySettings, ResolverSettings, ScoringConfig};
pub use overrides::OverrideRule;
pub use scored::{ScoredTransaction, round2};
pub use transaction::Transaction;
