use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_pointpilot_home, pointpilot_home};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringSection,
    #[serde(default)]
    pub report: ReportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringSection {
    /// Card table + override rules (.toml or .yaml)
    pub rules_path: String,
    /// Transactions CSV used when --csv is not given
    pub transactions_path: String,
    /// Source exports write purchases as negative amounts
    #[serde(default)]
    pub charges_negative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSection {
    /// Currency value of one point
    pub point_value: f64,
    /// Optimal-points total above which insights suggest redeeming
    pub redemption_threshold: f64,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            rules_path: "rules.toml".to_string(),
            transactions_path: "transactions.csv".to_string(),
            charges_negative: false,
        }
    }
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            point_value: 0.015,
            redemption_threshold: 10_000.0,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(pointpilot_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_pointpilot_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
