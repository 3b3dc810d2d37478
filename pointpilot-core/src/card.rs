//! Card reward profiles loaded from the rules file.

use crate::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tracked credit card and its earn table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardProfile {
    /// Canonical card name, unique within a config
    pub name: String,
    /// Multiplier used when the category has no table entry
    #[serde(default = "default_base_rate")]
    pub base_rate: f64,
    #[serde(default)]
    pub rewards: BTreeMap<Category, f64>,
    /// Extra substrings that identify this card in raw account labels
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub conditional: Vec<ConditionalRate>,
}

fn default_base_rate() -> f64 {
    1.0
}

/// A bonus rate that only applies at specific merchants (a card's own
/// booking portal, a co-branded carrier). Elsewhere the rate is capped
/// to `fallback_rate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionalRate {
    pub category: Category,
    pub merchant_keywords: Vec<String>,
    pub fallback_rate: f64,
}

impl ConditionalRate {
    pub fn merchant_qualifies(&self, merchant_lower: &str) -> bool {
        self.merchant_keywords
            .iter()
            .any(|kw| !kw.is_empty() && merchant_lower.contains(&kw.to_lowercase()))
    }
}

impl CardProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_rate: default_base_rate(),
            rewards: BTreeMap::new(),
            aliases: Vec::new(),
            conditional: Vec::new(),
        }
    }

    pub fn with_base_rate(mut self, rate: f64) -> Self {
        self.base_rate = rate;
        self
    }

    pub fn with_reward(mut self, category: Category, rate: f64) -> Self {
        self.rewards.insert(category, rate);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn with_conditional(
        mut self,
        category: Category,
        merchant_keywords: &[&str],
        fallback_rate: f64,
    ) -> Self {
        self.conditional.push(ConditionalRate {
            category,
            merchant_keywords: merchant_keywords.iter().map(|s| s.to_string()).collect(),
            fallback_rate,
        });
        self
    }

    /// Table multiplier for a category, or the base rate.
    pub fn table_rate(&self, category: Category) -> f64 {
        self.rewards.get(&category).copied().unwrap_or(self.base_rate)
    }

    pub fn conditional_for(&self, category: Category) -> Option<&ConditionalRate> {
        self.conditional.iter().find(|c| c.category == category)
    }
}
