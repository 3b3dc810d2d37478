//! Canonical spend categories used by every reward table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Closed set of spend buckets. Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(alias = "Restaurants", alias = "dining", alias = "restaurants")]
    Dining,
    #[serde(alias = "groceries", alias = "Grocery")]
    Groceries,
    #[serde(alias = "gas", alias = "Fuel")]
    Gas,
    #[serde(alias = "drugstores", alias = "Pharmacy")]
    Drugstores,
    #[serde(alias = "travel")]
    Travel,
    #[serde(rename = "Transit/Tolls", alias = "Transit", alias = "transit", alias = "Tolls")]
    TransitTolls,
    #[serde(alias = "entertainment")]
    Entertainment,
    #[serde(alias = "streaming")]
    Streaming,
    #[serde(alias = "shopping")]
    Shopping,
    #[serde(alias = "other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Dining,
        Category::Groceries,
        Category::Gas,
        Category::Drugstores,
        Category::Travel,
        Category::TransitTolls,
        Category::Entertainment,
        Category::Streaming,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dining => "Dining",
            Category::Groceries => "Groceries",
            Category::Gas => "Gas",
            Category::Drugstores => "Drugstores",
            Category::Travel => "Travel",
            Category::TransitTolls => "Transit/Tolls",
            Category::Entertainment => "Entertainment",
            Category::Streaming => "Streaming",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// Catch-all buckets carry no reward signal, so the normalizer
    /// falls through to merchant inference when a label lands here.
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Parses a canonical name (case-insensitive). Raw upstream labels go
    /// through the normalizer instead.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .or_else(|| match needle.to_ascii_lowercase().as_str() {
                "restaurants" => Some(Category::Dining),
                "transit" | "tolls" => Some(Category::TransitTolls),
                _ => None,
            })
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
