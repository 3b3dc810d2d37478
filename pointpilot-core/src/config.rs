//! Scoring configuration: card table, override rules, and filter lists.
//!
//! Loaded once per run from TOML or YAML and treated as read-only.

use crate::{CardProfile, OverrideRule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing TOML rules: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("parsing YAML rules: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported rules file extension: {0} (expected .toml, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("no cards configured; at least one card profile is required")]
    NoCards,
    #[error("no override rules configured; a rules file needs at least one [[overrides]] entry")]
    NoOverrides,
    #[error("duplicate card name: {0}")]
    DuplicateCard(String),
    #[error("invalid rate {rate} for card {card} ({field})")]
    InvalidRate {
        card: String,
        field: String,
        rate: f64,
    },
    #[error("override #{index} names unknown preferred card: {card}")]
    UnknownPreferredCard { index: usize, card: String },
    #[error("override #{index} has no match patterns")]
    EmptyOverrideMatch { index: usize },
    #[error("override #{index} has invalid multiplier {rate}")]
    InvalidOverrideRate { index: usize, rate: f64 },
}

/// Labels that mark an account as not a reward-earning credit card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolverSettings {
    #[serde(default = "default_account_exclusions")]
    pub exclude: Vec<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            exclude: default_account_exclusions(),
        }
    }
}

fn default_account_exclusions() -> Vec<String> {
    [
        "checking",
        "savings",
        "money market",
        "brokerage",
        "transfer",
        "paypal",
        "venmo",
        "zelle",
        "cash app",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Transaction types and merchant phrases that are not reward-eligible spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EligibilitySettings {
    #[serde(default = "default_excluded_types")]
    pub excluded_types: Vec<String>,
    #[serde(default = "default_excluded_keywords")]
    pub excluded_keywords: Vec<String>,
}

impl Default for EligibilitySettings {
    fn default() -> Self {
        Self {
            excluded_types: default_excluded_types(),
            excluded_keywords: default_excluded_keywords(),
        }
    }
}

fn default_excluded_types() -> Vec<String> {
    [
        "transfer",
        "transfer_in",
        "transfer_out",
        "loan_payments",
        "bank_fees",
        "income",
        "payment",
        "refund",
        "adjustment",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_excluded_keywords() -> Vec<String> {
    [
        "payment thank you",
        "autopay",
        "online payment",
        "refund",
        "balance adjustment",
        "interest charge",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Everything the scoring engine needs, passed explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    pub cards: Vec<CardProfile>,
    #[serde(default)]
    pub overrides: Vec<OverrideRule>,
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub eligibility: EligibilitySettings,
}

impl ScoringConfig {
    /// Build and validate a config from in-memory parts.
    pub fn new(cards: Vec<CardProfile>, overrides: Vec<OverrideRule>) -> Result<Self, ConfigError> {
        let cfg = Self {
            cards,
            overrides,
            resolver: ResolverSettings::default(),
            eligibility: EligibilitySettings::default(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a rules file, choosing the parser by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let cfg = match ext.as_str() {
            "toml" => Self::from_toml_str(&text)?,
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        debug!(path = %path.display(), cards = cfg.cards.len(), overrides = cfg.overrides.len(), "loaded rules");
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate_rules_file()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate_rules_file()?;
        Ok(cfg)
    }

    /// Checks applied to a loaded rules file: everything `validate` checks,
    /// plus at least one override rule.
    pub fn validate_rules_file(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.overrides.is_empty() {
            return Err(ConfigError::NoOverrides);
        }
        Ok(())
    }

    /// Structural checks. In-memory configs may carry no overrides.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards.is_empty() {
            return Err(ConfigError::NoCards);
        }

        let mut seen = HashSet::new();
        for card in &self.cards {
            if !seen.insert(card.name.to_lowercase()) {
                return Err(ConfigError::DuplicateCard(card.name.clone()));
            }
            if !card.base_rate.is_finite() || card.base_rate <= 0.0 {
                return Err(invalid_rate(&card.name, "base_rate", card.base_rate));
            }
            for (cat, rate) in &card.rewards {
                if !rate.is_finite() || *rate < 0.0 {
                    return Err(invalid_rate(&card.name, cat.as_str(), *rate));
                }
            }
            for cond in &card.conditional {
                if !cond.fallback_rate.is_finite() || cond.fallback_rate < 0.0 {
                    return Err(invalid_rate(
                        &card.name,
                        &format!("{} fallback_rate", cond.category),
                        cond.fallback_rate,
                    ));
                }
            }
        }

        for (index, rule) in self.overrides.iter().enumerate() {
            if rule.patterns.iter().all(|p| p.trim().is_empty()) {
                return Err(ConfigError::EmptyOverrideMatch { index });
            }
            if let Some(card) = &rule.preferred_card {
                if self.card(card).is_none() {
                    return Err(ConfigError::UnknownPreferredCard {
                        index,
                        card: card.clone(),
                    });
                }
            }
            if let Some(rate) = rule.multiplier {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(ConfigError::InvalidOverrideRate { index, rate });
                }
            }
        }

        Ok(())
    }

    /// Case-insensitive card lookup by canonical name.
    pub fn card(&self, name: &str) -> Option<&CardProfile> {
        self.cards.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

fn invalid_rate(card: &str, field: &str, rate: f64) -> ConfigError {
    ConfigError::InvalidRate {
        card: card.to_string(),
        field: field.to_string(),
        rate,
    }
}
