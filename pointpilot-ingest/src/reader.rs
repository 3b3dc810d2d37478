//! Read transaction exports into `Transaction` rows.
//!
//! Columns are located by header name, case-insensitively:
//! date, merchant (or name/description), amount, category, account
//! (or card_used/card), type. Only merchant and amount are required.

use crate::amount::{parse_amount, parse_date};
use anyhow::{Context, Result, bail};
use pointpilot_core::Transaction;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Source writes purchases as negative numbers (bank-style exports)
    pub charges_negative: bool,
    /// Account label for rows with no account column
    pub default_account: Option<String>,
}

#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    merchant: usize,
    amount: usize,
    category: Option<usize>,
    account: Option<usize>,
    txn_type: Option<usize>,
}

fn find(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    })
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self> {
        let merchant = find(headers, &["merchant", "merchant_name", "name", "description"])
            .context("missing merchant/name/description column")?;
        let amount = find(headers, &["amount"]).context("missing amount column")?;
        Ok(Self {
            date: find(headers, &["date", "transaction_date", "trans_date"]),
            merchant,
            amount,
            category: find(headers, &["category", "raw_category", "personal_finance_category"]),
            account: find(headers, &["account", "card_used", "card", "account_name"]),
            txn_type: find(headers, &["type", "transaction_type", "txn_type"]),
        })
    }
}

fn field(record: &csv::StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Read transactions from any CSV source with a header row.
pub fn read_transactions<R: Read>(source: R, opts: &ReaderOptions) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let cols = Columns::locate(&headers)?;

    let mut txns = Vec::new();
    let mut malformed = 0usize;

    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("reading CSV row {}", line + 2))?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let raw_amount = field(&record, Some(cols.amount));
        let amount = match parse_amount(raw_amount) {
            Some(a) if opts.charges_negative => -a,
            Some(a) => a,
            None => {
                malformed += 1;
                debug!(row = line + 2, raw = raw_amount, "malformed amount, using 0");
                0.0
            }
        };

        let account = match field(&record, cols.account) {
            "" => opts.default_account.clone().unwrap_or_default(),
            a => a.to_string(),
        };
        let txn_type = match field(&record, cols.txn_type) {
            "" => "regular".to_string(),
            t => t.to_string(),
        };

        txns.push(Transaction {
            date: parse_date(field(&record, cols.date)),
            merchant: field(&record, Some(cols.merchant)).to_string(),
            amount,
            raw_category: field(&record, cols.category).to_string(),
            account,
            txn_type,
        });
    }

    if malformed > 0 {
        warn!(malformed, "rows with non-numeric amounts were treated as zero spend");
    }

    Ok(txns)
}

pub fn read_transactions_csv(path: impl AsRef<Path>, opts: &ReaderOptions) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("transactions file not found: {}", path.display());
    }
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_transactions(file, opts).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
date,merchant,amount,category,card_used,type
2025-09-01,Starbucks Coffee,6.45,Misc,Chase Freedom Unlimited,regular
2025-09-02,Shell Oil,$41.20,GAS,Citi AAdvantage,
2025-09-03,Mystery,N/A,,Chase Sapphire Preferred,regular
,Transfer to savings,500,TRANSFER_OUT,Chase Checking,transfer
,,,,,
";

    #[test]
    fn test_reads_rows_by_header() {
        let txns = read_transactions(SAMPLE.as_bytes(), &ReaderOptions::default()).unwrap();
        assert_eq!(txns.len(), 4);

        let first = &txns[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(first.merchant, "Starbucks Coffee");
        assert_eq!(first.amount, 6.45);
        assert_eq!(first.raw_category, "Misc");
        assert_eq!(first.account, "Chase Freedom Unlimited");

        assert_eq!(txns[1].amount, 41.2);
        assert_eq!(txns[1].txn_type, "regular");
        assert!(txns[3].date.is_none());
        assert_eq!(txns[3].txn_type, "transfer");
    }

    #[test]
    fn test_malformed_amount_is_zero() {
        let txns = read_transactions(SAMPLE.as_bytes(), &ReaderOptions::default()).unwrap();
        assert_eq!(txns[2].merchant, "Mystery");
        assert_eq!(txns[2].amount, 0.0);
    }

    #[test]
    fn test_alternate_headers_and_sign_flip() {
        let csv = "Name,Amount,Account Name\nTarget,-25.00,\n";
        let opts = ReaderOptions {
            charges_negative: true,
            default_account: Some("Freedom Flex".to_string()),
        };
        // "Account Name" is not a recognized header; default applies.
        let txns = read_transactions(csv.as_bytes(), &opts).unwrap();
        assert_eq!(txns[0].merchant, "Target");
        assert_eq!(txns[0].amount, 25.0);
        assert_eq!(txns[0].account, "Freedom Flex");
        assert_eq!(txns[0].raw_category, "");
    }

    #[test]
    fn test_missing_required_column() {
        let err = read_transactions("date,merchant\n2025-01-01,x\n".as_bytes(), &ReaderOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("amount"));
    }

    #[test]
    fn test_missing_file() {
        let err = read_transactions_csv("/definitely/not/here.csv", &ReaderOptions::default()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
