use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

/// Explorer settings. Every field has a default, so hosts may pass a partial
/// JSON override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,
    #[serde(default = "default_countries_url")]
    pub countries_url: String,
    /// Delay before a finished distance comparison closes itself.
    #[serde(default = "default_comparison_reset_ms")]
    pub comparison_reset_ms: u32,
    #[serde(default = "default_summary_top_n")]
    pub summary_top_n: usize,
    #[serde(default = "default_related_genera_limit")]
    pub related_genera_limit: usize,
    /// Fraction of the marker bounds added on each side before fitting.
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
}

fn default_dataset_url() -> String {
    "/api/dados_fosseis/".to_string()
}

fn default_countries_url() -> String {
    "https://raw.githubusercontent.com/johan/world.geo.json/master/countries.geo.json".to_string()
}

fn default_comparison_reset_ms() -> u32 {
    5000
}

fn default_summary_top_n() -> usize {
    5
}

fn default_related_genera_limit() -> usize {
    4
}

fn default_fit_padding() -> f64 {
    0.5
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            dataset_url: default_dataset_url(),
            countries_url: default_countries_url(),
            comparison_reset_ms: default_comparison_reset_ms(),
            summary_top_n: default_summary_top_n(),
            related_genera_limit: default_related_genera_limit(),
            fit_padding: default_fit_padding(),
        }
    }
}

impl ExplorerConfig {
    /// Parses a JSON override. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ExplorerError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::ExplorerConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg = ExplorerConfig::from_json(r#"{"comparison_reset_ms": 1500}"#).unwrap();
        assert_eq!(cfg.comparison_reset_ms, 1500);
        assert_eq!(cfg.dataset_url, "/api/dados_fosseis/");
        assert_eq!(cfg.summary_top_n, 5);
    }

    #[test]
    fn blank_input_is_default() {
        assert_eq!(ExplorerConfig::from_json("  ").unwrap(), ExplorerConfig::default());
        assert!(ExplorerConfig::from_json("{").is_err());
    }
}
