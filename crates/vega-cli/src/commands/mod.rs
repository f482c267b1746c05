pub mod calibrate;
pub mod config;
pub mod simulate;
pub mod snr;

use std::path::Path;

use anyhow::{Context, Result};
use vega_core::config::PlanConfig;

/// Load and validate a TOML plan config.
pub fn load_plan(path: &Path) -> Result<PlanConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: PlanConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

/// Render an optional metric, "-" when undefined.
pub fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}
