use serde::{Deserialize, Serialize};

/// PEG values at or below this are treated as this value before inversion.
pub const PEG_FLOOR: f64 = 0.01;

/// Analyst ratings run from 1 (strong buy) to 5 (sell).
pub const RATING_CEILING: f64 = 5.0;

/// A named input to the composite score.
///
/// The first six are the core factors every row must carry. `AltData` is the
/// optional blended alternative-data signal and only contributes when the
/// weight map carries an `AltData` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Factor {
    Peg,
    EpsGrowth,
    Rating,
    Upside,
    Sentiment,
    Insider,
    AltData,
}

impl Factor {
    pub const CORE: [Factor; 6] = [
        Factor::Peg,
        Factor::EpsGrowth,
        Factor::Rating,
        Factor::Upside,
        Factor::Sentiment,
        Factor::Insider,
    ];

    pub const ALL: [Factor; 7] = [
        Factor::Peg,
        Factor::EpsGrowth,
        Factor::Rating,
        Factor::Upside,
        Factor::Sentiment,
        Factor::Insider,
        Factor::AltData,
    ];

    /// Key used for this factor in a weight map.
    pub fn weight_key(&self) -> &'static str {
        match self {
            Factor::Peg => "PEG",
            Factor::EpsGrowth => "EPS",
            Factor::Rating => "Rating",
            Factor::Upside => "Upside",
            Factor::Sentiment => "Sentiment",
            Factor::Insider => "Insider",
            Factor::AltData => "AltData",
        }
    }

    /// Human-readable name for breakdown tables.
    pub fn label(&self) -> &'static str {
        match self {
            Factor::Peg => "PEG",
            Factor::EpsGrowth => "EPS Growth",
            Factor::Rating => "Analyst Rating",
            Factor::Upside => "Target Upside",
            Factor::Sentiment => "Sentiment",
            Factor::Insider => "Insider Depth",
            Factor::AltData => "Alt Data",
        }
    }

    pub fn from_weight_key(key: &str) -> Option<Factor> {
        Factor::ALL.into_iter().find(|f| f.weight_key() == key)
    }

    /// Map a raw factor value onto the "higher is better" scale used by the
    /// weighted sum.
    pub fn transform(&self, raw: f64) -> f64 {
        match self {
            Factor::Peg => 1.0 / raw.max(PEG_FLOOR),
            Factor::Rating => RATING_CEILING - raw,
            _ => raw,
        }
    }
}

/// The numeric inputs the engine scores, already in the caller's units
/// (percentages as raw numbers, sentiment and insider depth in [0, 1]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorValues {
    pub peg: f64,
    pub eps_growth: f64,
    pub analyst_rating: f64,
    pub target_upside: f64,
    pub sentiment: f64,
    pub insider_depth: f64,
    /// Blended alt-data value, present only when alt-data scoring is on.
    #[serde(default)]
    pub alt_data: Option<f64>,
}

impl FactorValues {
    /// Raw (untransformed) value for a factor. `None` only for `AltData`
    /// when no blend was computed.
    pub fn get(&self, factor: Factor) -> Option<f64> {
        match factor {
            Factor::Peg => Some(self.peg),
            Factor::EpsGrowth => Some(self.eps_growth),
            Factor::Rating => Some(self.analyst_rating),
            Factor::Upside => Some(self.target_upside),
            Factor::Sentiment => Some(self.sentiment),
            Factor::Insider => Some(self.insider_depth),
            Factor::AltData => self.alt_data,
        }
    }
}
