use serde::{Deserialize, Serialize};

use crate::scoring::FactorValues;

/// One screener row as it arrives from a CSV export or JSON dump.
///
/// The six factor columns are required. Everything else is optional
/// metadata used for filtering and display, or an alt-data signal.
/// Column names follow the dashboard exports; the aliases cover the
/// spellings that show up across them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRow {
    #[serde(rename = "Ticker", alias = "ticker", alias = "Symbol")]
    pub ticker: String,

    #[serde(rename = "Price", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    #[serde(rename = "PEG")]
    pub peg: f64,

    #[serde(rename = "PE", default, skip_serializing_if = "Option::is_none")]
    pub pe: Option<f64>,

    #[serde(rename = "EPSGrowth", alias = "EPS_Growth", alias = "EPSGr")]
    pub eps_growth: f64,

    #[serde(rename = "AnalystRating", alias = "AnalystSc")]
    pub analyst_rating: f64,

    #[serde(rename = "TargetUpside", alias = "TrgtUpside")]
    pub target_upside: f64,

    #[serde(rename = "Sentiment", alias = "SentimentScore", alias = "SentSc")]
    pub sentiment: f64,

    #[serde(rename = "InsiderDepth", alias = "InsiderSc")]
    pub insider_depth: f64,

    #[serde(
        rename = "MktCap",
        alias = "MarketCap",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub market_cap: Option<f64>,

    #[serde(
        rename = "30DayVol",
        alias = "Volume30d",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub volume_30d: Option<f64>,

    #[serde(rename = "Sector", default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    #[serde(rename = "Exchange", default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(
        rename = "RedditSc",
        alias = "Reddit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reddit: Option<f64>,

    #[serde(rename = "WebTraffic", default, skip_serializing_if = "Option::is_none")]
    pub web_traffic: Option<f64>,

    #[serde(rename = "GEX", default, skip_serializing_if = "Option::is_none")]
    pub gex: Option<f64>,
}

impl StockRow {
    /// The six core factor values. `alt_data` is left unset; the engine
    /// fills it in when a blend is configured.
    pub fn factors(&self) -> FactorValues {
        FactorValues {
            peg: self.peg,
            eps_growth: self.eps_growth,
            analyst_rating: self.analyst_rating,
            target_upside: self.target_upside,
            sentiment: self.sentiment,
            insider_depth: self.insider_depth,
            alt_data: None,
        }
    }

    /// Column name of the first factor holding NaN or an infinity.
    pub fn non_finite_factor(&self) -> Option<&'static str> {
        [
            ("PEG", self.peg),
            ("EPSGrowth", self.eps_growth),
            ("AnalystRating", self.analyst_rating),
            ("TargetUpside", self.target_upside),
            ("Sentiment", self.sentiment),
            ("InsiderDepth", self.insider_depth),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(column, _)| column)
    }
}
