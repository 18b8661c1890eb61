use serde::{Deserialize, Serialize};

use super::weights::{default_weights, WeightMap};

/// Main scoring configuration.
///
/// Weights are raw slider values on any non-negative scale; the engine
/// normalizes them so they sum to 1. A factor with no entry has weight 0.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights:
///     PEG: 20
///     EPS: 15
///     Rating: 20
///     Upside: 15
///     Sentiment: 15
///     Insider: 15
///     AltData: 10
///   alt_data:
///     reddit: { enabled: true, weight: 20, threshold: 0.3 }
///     gex: { enabled: false, weight: 25, threshold: 1.5 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Raw factor weights keyed by `PEG`, `EPS`, `Rating`, `Upside`,
    /// `Sentiment`, `Insider` and optionally `AltData` (default: 50 each for
    /// the six core factors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightMap>,

    /// Alternative-data blend, scored as the `AltData` factor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_data: Option<AltDataConfig>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Some(default_weights()),
            alt_data: None,
        }
    }
}

impl ScoringConfig {
    /// Configured raw weights, falling back to the defaults.
    pub fn raw_weights(&self) -> WeightMap {
        self.weights.clone().unwrap_or_else(default_weights)
    }
}

/// Per-signal settings for the alt-data blend.
///
/// A signal left out of the config uses its built-in default.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AltDataConfig {
    /// Reddit mention sentiment, expected in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit: Option<SignalSettings>,

    /// Web traffic change in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_traffic: Option<SignalSettings>,

    /// Gamma exposure signal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gex: Option<SignalSettings>,
}

/// One alt-data signal: whether it counts, how much, and the minimum value
/// at which it starts counting.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SignalSettings {
    #[serde(default)]
    pub enabled: bool,
    pub weight: f64,
    #[serde(default)]
    pub threshold: f64,
}
