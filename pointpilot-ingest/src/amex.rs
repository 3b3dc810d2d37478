//! American Express CSV statement exports.
//!
//! AMEX CSVs may have leading blank rows, then:
//! Date,Description,Amount,Extended Details,Appears On Your Statement As,
//! Address,City/State,Zip Code,Country,Reference,Category

use crate::amount::{parse_amount, parse_date};
use anyhow::{Context, Result};
use pointpilot_core::Transaction;
use std::io::Read;
use std::path::Path;

/// Sub-category after the first hyphen ("Restaurant-Bar & Café" -> "Bar & Café"),
/// or the whole label when there is none.
fn category_label(amex_category: &str) -> &str {
    amex_category
        .split_once('-')
        .map(|(_, sub)| sub.trim())
        .filter(|sub| !sub.is_empty())
        .unwrap_or_else(|| amex_category.trim())
}

/// Parse an AMEX export. Every row is attributed to `account`; AMEX charges
/// are positive and credits negative, matching `Transaction::amount`.
pub fn parse_amex<R: Read>(source: R, account: &str) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(source);

    let mut txns = Vec::new();
    let mut header_found = false;

    for result in rdr.records() {
        let record = result?;
        if !header_found {
            if record.get(0).map(|s| s.trim()) == Some("Date") {
                header_found = true;
            }
            continue;
        }

        let date = match parse_date(record.get(0).unwrap_or("")) {
            Some(d) => d,
            None => continue,
        };

        let description = record.get(1).unwrap_or("").trim();
        let amount = parse_amount(record.get(2).unwrap_or("")).unwrap_or(0.0);
        let txn_type = if description.to_uppercase().contains("PAYMENT - THANK YOU") {
            "payment"
        } else if amount < 0.0 {
            "refund"
        } else {
            "regular"
        };

        txns.push(
            Transaction::new(description, amount)
                .with_date(date)
                .with_category(category_label(record.get(10).unwrap_or("")))
                .with_account(account)
                .with_type(txn_type),
        );
    }

    Ok(txns)
}

pub fn read_amex_csv(path: impl AsRef<Path>, account: &str) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_amex(file, account).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const STATEMENT: &str = "\
,,,,,,,,,,
,,,,,,,,,,
Date,Description,Amount,Extended Details,Appears On Your Statement As,Address,City/State,Zip Code,Country,Reference,Category
02/16/2026,CLIPPER SYSTEMS SAN FRANCISCO,10.00,,,,,,,'320260470',Other-Government Services
02/14/2026,WAKABA RESTAURANT,37.30,,,,,,,'320260450',Restaurant-Restaurant
02/10/2026,AUTOPAY PAYMENT - THANK YOU,-512.00,,,,,,,'320260410',
02/09/2026,WHOLE FOODS,(4.99),,,,,,,'320260400',Merchandise & Supplies-Groceries
,,,,,,,,,,
";

    #[test]
    fn test_parse_statement() {
        let txns = parse_amex(STATEMENT.as_bytes(), "American Express Gold").unwrap();
        assert_eq!(txns.len(), 4);

        let clipper = &txns[0];
        assert_eq!(clipper.date, NaiveDate::from_ymd_opt(2026, 2, 16));
        assert_eq!(clipper.amount, 10.0);
        assert_eq!(clipper.raw_category, "Government Services");
        assert_eq!(clipper.account, "American Express Gold");

        assert_eq!(txns[1].raw_category, "Restaurant");
        assert_eq!(txns[2].txn_type, "payment");
        assert_eq!(txns[3].amount, -4.99);
        assert_eq!(txns[3].txn_type, "refund");
        assert_eq!(txns[3].raw_category, "Groceries");
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("Restaurant-Bar & Café"), "Bar & Café");
        assert_eq!(category_label("Travel"), "Travel");
        assert_eq!(category_label("Fees & Adjustments-"), "Fees & Adjustments-");
        assert_eq!(category_label(""), "");
    }
}
