pub mod error;
pub mod loader;
pub mod types;

pub use error::DataError;
pub use loader::{load_rows, read_csv, read_json};
pub use types::StockRow;

#[cfg(test)]
pub(crate) mod test_support {
    use super::StockRow;

    /// A complete row with middling factor values and no optional metadata.
    pub fn sample_row(ticker: &str) -> StockRow {
        StockRow {
            ticker: ticker.to_string(),
            price: None,
            peg: 1.5,
            pe: None,
            eps_growth: 12.0,
            analyst_rating: 2.5,
            target_upside: 10.0,
            sentiment: 0.5,
            insider_depth: 0.3,
            market_cap: None,
            volume_30d: None,
            sector: None,
            exchange: None,
            country: None,
            reddit: None,
            web_traffic: None,
            gex: None,
        }
    }
}
