//! Alternative-data blend.
//!
//! Enabled signals are weighted among themselves (normalized independently
//! of the main factor weights) and collapse into a single `AltData` value per
//! row. A signal only counts once it reaches its threshold.

use super::config::{AltDataConfig, SignalSettings};
use super::weights::{normalize_weights, WeightMap};
use crate::data::StockRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AltSignal {
    Reddit,
    WebTraffic,
    Gex,
}

impl AltSignal {
    pub const ALL: [AltSignal; 3] = [AltSignal::Reddit, AltSignal::WebTraffic, AltSignal::Gex];

    pub fn label(&self) -> &'static str {
        match self {
            AltSignal::Reddit => "Reddit",
            AltSignal::WebTraffic => "WebTraffic",
            AltSignal::Gex => "GEX",
        }
    }

    /// Control-panel defaults.
    pub fn default_settings(&self) -> SignalSettings {
        match self {
            AltSignal::Reddit => SignalSettings {
                enabled: true,
                weight: 20.0,
                threshold: 0.3,
            },
            AltSignal::WebTraffic => SignalSettings {
                enabled: false,
                weight: 15.0,
                threshold: 10.0,
            },
            AltSignal::Gex => SignalSettings {
                enabled: true,
                weight: 25.0,
                threshold: 1.5,
            },
        }
    }

    pub fn settings(&self, config: &AltDataConfig) -> SignalSettings {
        let configured = match self {
            AltSignal::Reddit => config.reddit,
            AltSignal::WebTraffic => config.web_traffic,
            AltSignal::Gex => config.gex,
        };
        configured.unwrap_or_else(|| self.default_settings())
    }

    pub fn value(&self, row: &StockRow) -> Option<f64> {
        match self {
            AltSignal::Reddit => row.reddit,
            AltSignal::WebTraffic => row.web_traffic,
            AltSignal::Gex => row.gex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveSignal {
    signal: AltSignal,
    weight: f64,
    threshold: f64,
}

/// Resolved blend: enabled signals with their normalized weights.
#[derive(Debug, Clone, PartialEq)]
pub struct AltDataBlend {
    signals: Vec<ActiveSignal>,
}

impl AltDataBlend {
    pub fn new(config: &AltDataConfig) -> Self {
        let enabled: Vec<(AltSignal, SignalSettings)> = AltSignal::ALL
            .iter()
            .map(|s| (*s, s.settings(config)))
            .filter(|(_, settings)| settings.enabled)
            .collect();

        let raw: WeightMap = enabled
            .iter()
            .map(|(s, settings)| (s.label().to_string(), settings.weight))
            .collect();
        let normalized = normalize_weights(&raw);

        let signals = enabled
            .into_iter()
            .map(|(signal, settings)| ActiveSignal {
                signal,
                weight: normalized.get(signal.label()).copied().unwrap_or(0.0),
                threshold: settings.threshold,
            })
            .collect();

        Self { signals }
    }

    /// Labels and normalized weights of the enabled signals.
    pub fn weights(&self) -> Vec<(&'static str, f64)> {
        self.signals
            .iter()
            .map(|s| (s.signal.label(), s.weight))
            .collect()
    }

    /// Weighted sum of the signals that are present and at or above
    /// their threshold.
    pub fn score(&self, row: &StockRow) -> f64 {
        self.signals
            .iter()
            .map(|active| match active.signal.value(row) {
                Some(value) if value >= active.threshold => value * active.weight,
                _ => 0.0,
            })
            .sum()
    }
}
