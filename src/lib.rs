//! Composite stock-screener scoring.
//!
//! Rows carrying six factor values (PEG, EPS growth, analyst rating, target
//! upside, sentiment, insider depth) are scored as a weighted sum of
//! per-factor transforms under normalized weights, then tiered by the
//! quartiles of the current row set.

pub mod config;
pub mod data;
pub mod logging;
pub mod output;
pub mod presets;
pub mod scoring;
pub mod screen;
