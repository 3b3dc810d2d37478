//! Merchant-triggered override rules.

use crate::Category;
use serde::{Deserialize, Serialize};

/// Replaces the category and/or card multiplier for merchants matching
/// any of `patterns`. Rules are evaluated in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverrideRule {
    #[serde(rename = "match")]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub preferred_card: Option<String>,
    #[serde(default)]
    pub multiplier: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl OverrideRule {
    pub fn new(patterns: &[&str]) -> Self {
        Self {
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            category: None,
            preferred_card: None,
            multiplier: None,
            reason: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_card(mut self, card: impl Into<String>, multiplier: f64) -> Self {
        self.preferred_card = Some(card.into());
        self.multiplier = Some(multiplier);
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// First pattern contained in the (already lower-cased) merchant text.
    pub fn matched_pattern(&self, merchant_lower: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(|p| p.as_str())
            .find(|p| !p.trim().is_empty() && merchant_lower.contains(&p.trim().to_lowercase()))
    }
}
