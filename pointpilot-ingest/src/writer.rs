//! Write scored rows and summary tables as CSV or JSON.

use anyhow::{Context, Result};
use pointpilot_core::ScoredTransaction;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Flat CSV shape of a `ScoredTransaction`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredRow {
    pub date: String,
    pub merchant: String,
    pub amount: f64,
    pub raw_category: String,
    pub account: String,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub card_used: String,
    pub category: String,
    pub used_rate: f64,
    pub best_rate: f64,
    pub best_cards: String,
    pub points_earned: f64,
    pub optimal_points: f64,
    pub missed_points: f64,
    pub used_best_card: bool,
    pub override_applied: bool,
    pub override_reason: String,
}

impl From<&ScoredTransaction> for ScoredRow {
    fn from(s: &ScoredTransaction) -> Self {
        let t = &s.transaction;
        Self {
            date: t.date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            merchant: t.merchant.clone(),
            amount: t.amount,
            raw_category: t.raw_category.clone(),
            account: t.account.clone(),
            txn_type: t.txn_type.clone(),
            card_used: s.card.clone(),
            category: s.category.to_string(),
            used_rate: s.used_rate,
            best_rate: s.best_rate,
            best_cards: s.best_cards.join("|"),
            points_earned: s.points_earned,
            optimal_points: s.optimal_points,
            missed_points: s.missed_points,
            used_best_card: s.used_best_card,
            override_applied: s.override_applied,
            override_reason: s.override_reason.clone().unwrap_or_default(),
        }
    }
}

/// Serialize any flat records as CSV with a header row.
pub fn write_csv<W: Write, T: Serialize>(sink: W, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(sink);
    for row in rows {
        wtr.serialize(row).context("serializing CSV row")?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn write_scored_csv(path: impl AsRef<Path>, scored: &[ScoredTransaction]) -> Result<()> {
    let path = path.as_ref();
    let rows: Vec<ScoredRow> = scored.iter().map(ScoredRow::from).collect();
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, &rows).with_context(|| format!("writing {}", path.display()))
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(mut sink: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, value).context("serializing JSON")?;
    writeln!(sink)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pointpilot_core::{Category, Transaction};

    fn scored() -> ScoredTransaction {
        ScoredTransaction {
            transaction: Transaction::new("Chase Travel Portal", 200.0)
                .with_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
                .with_account("Sapphire"),
            card: "Chase Sapphire Preferred".to_string(),
            category: Category::Travel,
            used_rate: 5.0,
            best_rate: 5.0,
            best_cards: vec!["Chase Sapphire Preferred".to_string(), "Other Card".to_string()],
            points_earned: 1000.0,
            optimal_points: 1000.0,
            missed_points: 0.0,
            used_best_card: true,
            override_applied: true,
            override_reason: Some("portal".to_string()),
        }
    }

    #[test]
    fn test_scored_csv_shape() {
        let rows = vec![ScoredRow::from(&scored())];
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,merchant,amount,raw_category,account,type,card_used,category,used_rate,best_rate,\
best_cards,points_earned,optimal_points,missed_points,used_best_card,override_applied,override_reason"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("2025-06-01,Chase Travel Portal,200.0,,Sapphire,regular,"));
        assert!(row.contains("Chase Sapphire Preferred|Other Card"));
        assert!(row.ends_with("true,true,portal"));
    }

    #[test]
    fn test_write_scored_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_scored_csv(&path, &[scored()]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_json_output() {
        let mut buf = Vec::new();
        write_json(&mut buf, &vec![ScoredRow::from(&scored())]).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0]["category"], "Travel");
        assert_eq!(parsed[0]["type"], "regular");
    }
}
