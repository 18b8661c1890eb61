use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;
use crate::screen::FilterConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default input file when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<FilterConfig>,
}

impl Config {
    /// Scoring config with built-in defaults filled in.
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }

    pub fn effective_filters(&self) -> FilterConfig {
        self.filters.clone().unwrap_or_default()
    }

    /// Run every config validator, collecting all errors.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Err(e) = crate::scoring::validate_scoring(&self.effective_scoring()) {
            errors.extend(e);
        }
        if let Err(e) = crate::screen::validate_filters(&self.effective_filters()) {
            errors.extend(e);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.data.is_none());
        assert!(config.scoring.is_none());
        assert_eq!(config.effective_scoring(), ScoringConfig::default());
        assert_eq!(config.effective_filters(), FilterConfig::default());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
data: /tmp/mock_stock_data.csv
scoring:
  weights:
    PEG: 20
    EPS: 15
    Rating: 20
    Upside: 15
    Sentiment: 15
    Insider: 15
filters:
  peg:
    max: 3
  us_only: true
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.data, Some(PathBuf::from("/tmp/mock_stock_data.csv")));
        assert_eq!(config.effective_scoring().raw_weights().len(), 6);
        assert!(config.effective_filters().us_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_collects_scoring_and_filter_errors() {
        let yaml = r#"
scoring:
  weights:
    PEG: -5
filters:
  price:
    min: 10
    max: 1
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("scoring.weights.PEG"));
        assert!(errors[1].starts_with("filters.price"));
    }

    #[test]
    fn test_unknown_top_level_key_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("queries: []\n");
        assert!(result.is_err());
    }
}
