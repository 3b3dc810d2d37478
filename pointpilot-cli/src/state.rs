use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$POINTPILOT_HOME`, else `~/.pointpilot`.
pub fn pointpilot_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("POINTPILOT_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pointpilot"))
}

pub fn ensure_pointpilot_home() -> Result<PathBuf> {
    let dir = pointpilot_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
