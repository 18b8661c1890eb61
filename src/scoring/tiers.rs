use serde::{Deserialize, Serialize};

/// Relative standing of a row within the current row set.
///
/// Variants are declared worst to best so `Ord` follows rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    BottomQuartile,
    BottomHalf,
    TopHalf,
    TopQuartile,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::TopQuartile => "Top 25%",
            Tier::TopHalf => "Top 50%",
            Tier::BottomHalf => "Bottom 50%",
            Tier::BottomQuartile => "Bottom 25%",
        }
    }
}

/// 25th, 50th and 75th percentile of a score set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

impl Quartiles {
    /// `None` for an empty score set.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let mut sorted = scores.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(Self {
            q1: quantile(&sorted, 0.25),
            q2: quantile(&sorted, 0.50),
            q3: quantile(&sorted, 0.75),
        })
    }

    /// Boundaries are inclusive on the upper side: a score equal to a
    /// threshold lands in the higher tier.
    pub fn classify(&self, score: f64) -> Tier {
        if score >= self.q3 {
            Tier::TopQuartile
        } else if score >= self.q2 {
            Tier::TopHalf
        } else if score >= self.q1 {
            Tier::BottomHalf
        } else {
            Tier::BottomQuartile
        }
    }
}

/// Linear-interpolation quantile over ascending-sorted values.
///
/// Position is `(n - 1) * p`, interpolated between the neighbouring values
/// (the numpy/pandas default). `sorted` must be non-empty.
pub fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Tier every score against the quartiles of the whole sequence.
pub fn assign_tier(scores: &[f64]) -> Vec<Tier> {
    match Quartiles::from_scores(scores) {
        Some(quartiles) => scores.iter().map(|s| quartiles.classify(*s)).collect(),
        None => Vec::new(),
    }
}
