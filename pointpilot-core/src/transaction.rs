//! Input transaction rows as read from a statement or export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One purchase event, before any normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Posting date, if the source row had a parseable one
    pub date: Option<NaiveDate>,
    /// Merchant name or free-text description
    pub merchant: String,
    /// Spend magnitude; malformed source values arrive as 0.0
    pub amount: f64,
    /// Category label exactly as the source provided it
    pub raw_category: String,
    /// Account/card label exactly as the source provided it
    pub account: String,
    /// Source transaction type tag ("regular", "transfer", ...)
    pub txn_type: String,
}

impl Transaction {
    pub fn new(merchant: impl Into<String>, amount: f64) -> Self {
        Self {
            date: None,
            merchant: merchant.into(),
            amount,
            raw_category: String::new(),
            account: String::new(),
            txn_type: "regular".to_string(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_category(mut self, raw_category: impl Into<String>) -> Self {
        self.raw_category = raw_category.into();
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    pub fn with_type(mut self, txn_type: impl Into<String>) -> Self {
        self.txn_type = txn_type.into();
        self
    }

    /// Lower-cased merchant text used by every substring matcher.
    pub fn merchant_key(&self) -> String {
        self.merchant.trim().to_lowercase()
    }
}
