//! Lenient amount and date parsing for exported statements.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<open>\()?\s*(?P<sign>-)?\s*\$?\s*",
            r"(?P<num>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d*\.?\d+)",
            r"\s*(?P<close>\))?$"
        ))
        .expect("amount regex is valid")
    })
}

/// Parse "12.50", "$1,234.56", "-4.00", "(15.00)". Anything else is `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let caps = amount_re().captures(raw.trim())?;
    let mut value: f64 = caps["num"].replace(',', "").parse().ok()?;
    let parens = caps.name("open").is_some() && caps.name("close").is_some();
    if caps.name("sign").is_some() || parens {
        value = -value;
    }
    Some(value)
}

// Two-digit years first: "%Y" would also accept "25" as year 25.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    // Drop a trailing time component ("2025-01-02 00:00:00").
    let s = s.split_whitespace().next().unwrap_or(s);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
