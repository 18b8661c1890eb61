pub mod altdata;
pub mod config;
pub mod engine;
pub mod factors;
pub mod tiers;
pub mod validation;
pub mod weights;

pub use altdata::{AltDataBlend, AltSignal};
pub use config::*;
pub use engine::{
    breakdown, score_row, sort_by_score, FactorContribution, ScoreEngine, ScoreResult, ScoredRow,
    ScoredSet,
};
pub use factors::{Factor, FactorValues, PEG_FLOOR, RATING_CEILING};
pub use tiers::{assign_tier, quantile, Quartiles, Tier};
pub use validation::validate_scoring;
pub use weights::{default_weights, normalize_weights, weight_of, WeightMap, DEFAULT_RAW_WEIGHT};
