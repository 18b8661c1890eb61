use serde::{Deserialize, Serialize};

use crate::data::StockRow;

/// Inclusive numeric range. Either end may be left open.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Screen settings: column ranges plus exchange/country toggles.
///
/// Example YAML:
/// ```yaml
/// filters:
///   peg: { max: 2.0 }
///   market_cap: { min: 300000000 }
///   analyst_rating: { min: 1, max: 3 }
///   nasdaq_only: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peg: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pe: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eps_growth: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyst_rating: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_upside: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_30d: Option<Bounds>,

    /// Keep only rows whose country is US
    #[serde(default)]
    pub us_only: bool,
    /// Keep only NASDAQ listings (combined with `nyse_only`: either exchange)
    #[serde(default)]
    pub nasdaq_only: bool,
    /// Keep only NYSE listings (combined with `nasdaq_only`: either exchange)
    #[serde(default)]
    pub nyse_only: bool,
}

type ColumnGetter = fn(&StockRow) -> Option<f64>;

impl FilterConfig {
    /// Configured column ranges, named by their config key.
    fn columns(&self) -> [(&'static str, Option<Bounds>, ColumnGetter); 8] {
        [
            ("price", self.price, |r| r.price),
            ("peg", self.peg, |r| Some(r.peg)),
            ("pe", self.pe, |r| r.pe),
            ("eps_growth", self.eps_growth, |r| Some(r.eps_growth)),
            ("analyst_rating", self.analyst_rating, |r| Some(r.analyst_rating)),
            ("target_upside", self.target_upside, |r| Some(r.target_upside)),
            ("market_cap", self.market_cap, |r| r.market_cap),
            ("volume_30d", self.volume_30d, |r| r.volume_30d),
        ]
    }

    /// A bound on a column the row doesn't carry excludes the row.
    pub fn matches(&self, row: &StockRow) -> bool {
        let in_range = self.columns().iter().all(|(_, bounds, get)| match bounds {
            Some(bounds) => get(row).is_some_and(|v| bounds.contains(v)),
            None => true,
        });
        in_range && self.matches_listing(row)
    }

    fn matches_listing(&self, row: &StockRow) -> bool {
        if self.us_only && !row.country.as_deref().is_some_and(is_us) {
            return false;
        }
        if !self.nasdaq_only && !self.nyse_only {
            return true;
        }
        let exchange = row.exchange.as_deref().unwrap_or("");
        (self.nasdaq_only && exchange.eq_ignore_ascii_case("NASDAQ"))
            || (self.nyse_only && exchange.eq_ignore_ascii_case("NYSE"))
    }
}

fn is_us(country: &str) -> bool {
    ["US", "USA", "United States"]
        .iter()
        .any(|c| country.eq_ignore_ascii_case(c))
}

/// Keep the rows that pass every configured filter, in input order.
pub fn filter_rows(rows: Vec<StockRow>, filters: &FilterConfig) -> Vec<StockRow> {
    rows.into_iter().filter(|row| filters.matches(row)).collect()
}

/// Validate filter ranges. Returns all errors at once.
pub fn validate_filters(filters: &FilterConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, bounds, _) in filters.columns() {
        let Some(bounds) = bounds else { continue };
        for (end, value) in [("min", bounds.min), ("max", bounds.max)] {
            if value.is_some_and(|v| !v.is_finite()) {
                errors.push(format!("filters.{}.{}: must be a finite number", name, end));
            }
        }
        if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
            if min > max {
                errors.push(format!(
                    "filters.{}: min ({}) is greater than max ({})",
                    name, min, max
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
