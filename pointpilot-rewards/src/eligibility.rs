//! Reward-eligibility filter: transfers, payments, refunds and balance
//! adjustments are removed before scoring, never scored as zero.

use pointpilot_core::{EligibilitySettings, Transaction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionReason {
    TransactionType(String),
    MerchantKeyword(String),
    NegativeAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    Excluded(ExclusionReason),
}

#[derive(Debug, Clone)]
pub struct EligibilityFilter {
    types: Vec<String>,
    keywords: Vec<String>,
}

fn type_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl EligibilityFilter {
    pub fn new(settings: &EligibilitySettings) -> Self {
        Self {
            types: settings
                .excluded_types
                .iter()
                .map(|t| type_key(t))
                .filter(|t| !t.is_empty())
                .collect(),
            keywords: settings
                .excluded_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn check(&self, txn: &Transaction) -> Eligibility {
        let tag = type_key(&txn.txn_type);
        if let Some(t) = self.types.iter().find(|t| tag.contains(t.as_str())) {
            return Eligibility::Excluded(ExclusionReason::TransactionType(t.clone()));
        }

        let merchant = txn.merchant_key();
        if let Some(kw) = self.keywords.iter().find(|k| merchant.contains(k.as_str())) {
            return Eligibility::Excluded(ExclusionReason::MerchantKeyword(kw.clone()));
        }

        if txn.amount < 0.0 {
            return Eligibility::Excluded(ExclusionReason::NegativeAmount);
        }

        Eligibility::Eligible
    }

    pub fn is_eligible(&self, txn: &Transaction) -> bool {
        self.check(txn) == Eligibility::Eligible
    }
}

impl Default for EligibilityFilter {
    fn default() -> Self {
        Self::new(&EligibilitySettings::default())
    }
}
