//! Chart configuration shared by the CLI and the GUI.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```json
//! { "title": "Signups", "width": 1200, "legend": "Inside" }
//! ```

use crate::axis::DEFAULT_TICK_COUNT;
use crate::viz::{DEFAULT_LEGEND_MODE, LegendMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Desired number of x-axis ticks.
    pub tick_count: usize,
    /// Locale tag for number formatting (`en`, `de`, `fr`, ...).
    pub locale: String,
    pub legend: LegendMode,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "User Types, Over Time".to_string(),
            width: 1000,
            height: 1000,
            tick_count: DEFAULT_TICK_COUNT,
            locale: "en".to_string(),
            legend: DEFAULT_LEGEND_MODE,
        }
    }
}

impl ChartConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("invalid chart config JSON")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_json_str(&text)?;
        log::debug!("loaded chart config from {}", path.display());
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ChartConfig::from_json_str(r#"{ "title": "Signups", "legend": "Inside" }"#)
            .unwrap();
        assert_eq!(cfg.title, "Signups");
        assert_eq!(cfg.legend, LegendMode::Inside);
        assert_eq!(cfg.tick_count, DEFAULT_TICK_COUNT);
        assert_eq!(cfg.width, ChartConfig::default().width);
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(ChartConfig::from_json_str("{ title: }").is_err());
    }
}
