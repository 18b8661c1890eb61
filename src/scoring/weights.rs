use std::collections::BTreeMap;

use super::factors::Factor;

/// Factor weight keyed by weight key (`PEG`, `EPS`, `Rating`, ...).
pub type WeightMap = BTreeMap<String, f64>;

/// Divide every weight by the sum of all weights.
///
/// A zero sum is replaced by 1, so an all-zero map comes back all zero
/// instead of failing. Negative weights are the caller's problem; config
/// validation rejects them before they get here.
pub fn normalize_weights(raw: &WeightMap) -> WeightMap {
    let total: f64 = raw.values().sum();
    let total = if total == 0.0 { 1.0 } else { total };
    raw.iter()
        .map(|(name, weight)| (name.clone(), weight / total))
        .collect()
}

/// Weight for a factor, 0 when the map has no entry for it.
pub fn weight_of(weights: &WeightMap, factor: Factor) -> f64 {
    weights.get(factor.weight_key()).copied().unwrap_or(0.0)
}

/// Default slider position for every core factor.
pub const DEFAULT_RAW_WEIGHT: f64 = 50.0;

/// Raw weights with every core factor at the default slider position.
pub fn default_weights() -> WeightMap {
    Factor::CORE
        .iter()
        .map(|f| (f.weight_key().to_string(), DEFAULT_RAW_WEIGHT))
        .collect()
}
