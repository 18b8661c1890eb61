use serde::Serialize;
use tracing::debug;

use super::altdata::AltDataBlend;
use super::config::ScoringConfig;
use super::factors::{Factor, FactorValues};
use super::tiers::{Quartiles, Tier};
use super::weights::{normalize_weights, weight_of, WeightMap};
use crate::data::StockRow;

/// One term of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: Factor,
    pub raw: f64,         // Value as supplied by the row
    pub transformed: f64, // After inversion/flooring
    pub weight: f64,      // Normalized weight
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: Vec<FactorContribution>,
}

/// A row after a scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRow {
    #[serde(flatten)]
    pub row: StockRow,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Tier")]
    pub tier: Tier,
    #[serde(skip)]
    pub breakdown: Vec<FactorContribution>,
}

/// Output of a full pass over a row set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSet {
    pub rows: Vec<ScoredRow>,
    /// `None` when the row set was empty.
    pub quartiles: Option<Quartiles>,
}

/// Per-factor contributions for a row. Factors with no transformable value
/// (`AltData` when no blend was computed) are left out.
pub fn breakdown(row: &FactorValues, weights: &WeightMap) -> Vec<FactorContribution> {
    Factor::ALL
        .iter()
        .filter_map(|factor| {
            let raw = row.get(*factor)?;
            let transformed = factor.transform(raw);
            let weight = weight_of(weights, *factor);
            Some(FactorContribution {
                factor: *factor,
                raw,
                transformed,
                weight,
                contribution: transformed * weight,
            })
        })
        .collect()
}

/// Composite score: the sum of every factor's contribution.
pub fn score_row(row: &FactorValues, weights: &WeightMap) -> f64 {
    breakdown(row, weights).iter().map(|c| c.contribution).sum()
}

/// Scores rows against one immutable configuration.
///
/// Weights are normalized once at construction. The engine holds no mutable
/// state, so a single instance can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEngine {
    weights: WeightMap,
    alt_data: Option<AltDataBlend>,
}

impl ScoreEngine {
    /// Without an `alt_data` block an `AltData` weight has nothing to score,
    /// so it is left out before normalizing.
    pub fn new(config: &ScoringConfig) -> Self {
        let mut raw = config.raw_weights();
        if config.alt_data.is_none() && raw.remove(Factor::AltData.weight_key()).is_some() {
            debug!("ignoring AltData weight: no alt_data block configured");
        }
        let weights = normalize_weights(&raw);
        let alt_data = config.alt_data.as_ref().map(AltDataBlend::new);
        debug!(?weights, alt_data = alt_data.is_some(), "score engine configured");
        Self { weights, alt_data }
    }

    /// Normalized weights in use.
    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }

    pub fn alt_data(&self) -> Option<&AltDataBlend> {
        self.alt_data.as_ref()
    }

    /// Factor values for a row, with the alt-data blend filled in when
    /// configured.
    pub fn factor_values(&self, row: &StockRow) -> FactorValues {
        let mut values = row.factors();
        values.alt_data = self.alt_data.as_ref().map(|blend| blend.score(row));
        values
    }

    pub fn score(&self, row: &StockRow) -> ScoreResult {
        let values = self.factor_values(row);
        let breakdown = breakdown(&values, &self.weights);
        let score = breakdown.iter().map(|c| c.contribution).sum();
        ScoreResult { score, breakdown }
    }

    /// Score every row and tier it against the quartiles of this set.
    ///
    /// Rows keep their input order.
    pub fn score_rows(&self, rows: Vec<StockRow>) -> ScoredSet {
        let results: Vec<ScoreResult> = rows.iter().map(|row| self.score(row)).collect();
        let scores: Vec<f64> = results.iter().map(|r| r.score).collect();
        let quartiles = Quartiles::from_scores(&scores);

        if let Some(q) = &quartiles {
            debug!(rows = scores.len(), q1 = q.q1, q2 = q.q2, q3 = q.q3, "quartiles computed");
        }

        let rows = rows
            .into_iter()
            .zip(results)
            .map(|(row, result)| ScoredRow {
                tier: quartiles
                    .map(|q| q.classify(result.score))
                    .unwrap_or(Tier::TopQuartile),
                score: result.score,
                breakdown: result.breakdown,
                row,
            })
            .collect();

        ScoredSet { rows, quartiles }
    }
}

/// Sort by score descending, ties by ticker ascending.
pub fn sort_by_score(rows: &mut [ScoredRow]) {
    rows.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.row.ticker.cmp(&b.row.ticker))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::sample_row;
    use crate::scoring::{default_weights, AltDataConfig, SignalSettings};

    fn example_weights() -> WeightMap {
        [
            ("PEG", 0.2),
            ("EPS", 0.15),
            ("Rating", 0.2),
            ("Upside", 0.15),
            ("Sentiment", 0.15),
            ("Insider", 0.15),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
    }

    fn row_one() -> FactorValues {
        FactorValues {
            peg: 1.2,
            eps_growth: 18.0,
            analyst_rating: 2.2,
            target_upside: 15.0,
            sentiment: 0.21,
            insider_depth: 0.60,
            alt_data: None,
        }
    }

    fn row_two() -> FactorValues {
        FactorValues {
            peg: 2.5,
            eps_growth: 35.0,
            analyst_rating: 3.2,
            target_upside: 20.0,
            sentiment: 0.61,
            insider_depth: 0.02,
            alt_data: None,
        }
    }

    fn contribution(parts: &[FactorContribution], factor: Factor) -> f64 {
        parts.iter().find(|c| c.factor == factor).unwrap().contribution
    }

    #[test]
    fn test_worked_example_row_one() {
        let parts = breakdown(&row_one(), &example_weights());
        assert_eq!(parts.len(), 6);

        assert!((contribution(&parts, Factor::Peg) - 0.2 / 1.2).abs() < 1e-9);
        assert!((contribution(&parts, Factor::EpsGrowth) - 2.7).abs() < 1e-9);
        assert!((contribution(&parts, Factor::Rating) - 0.56).abs() < 1e-9);
        assert!((contribution(&parts, Factor::Upside) - 2.25).abs() < 1e-9);
        assert!((contribution(&parts, Factor::Sentiment) - 0.0315).abs() < 1e-9);
        assert!((contribution(&parts, Factor::Insider) - 0.09).abs() < 1e-9);

        let score = score_row(&row_one(), &example_weights());
        assert!((score - 5.798).abs() < 1e-3);
    }

    #[test]
    fn test_worked_example_row_two() {
        // 0.08 + 5.25 + 0.36 + 3.0 + 0.0915 + 0.003
        let score = score_row(&row_two(), &example_weights());
        assert!((score - 8.7845).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_sums_to_score() {
        let weights = example_weights();
        let parts = breakdown(&row_two(), &weights);
        let total: f64 = parts.iter().map(|c| c.contribution).sum();
        assert_eq!(total, score_row(&row_two(), &weights));
    }

    #[test]
    fn test_breakdown_reports_raw_and_transformed() {
        let parts = breakdown(&row_one(), &example_weights());
        let peg = parts.iter().find(|c| c.factor == Factor::Peg).unwrap();
        assert_eq!(peg.raw, 1.2);
        assert!((peg.transformed - 1.0 / 1.2).abs() < 1e-12);
        assert_eq!(peg.weight, 0.2);

        let rating = parts.iter().find(|c| c.factor == Factor::Rating).unwrap();
        assert_eq!(rating.raw, 2.2);
        assert!((rating.transformed - 2.8).abs() < 1e-12);
    }

    #[test]
    fn test_peg_zero_matches_peg_floor() {
        let weights = example_weights();
        let mut zero = row_one();
        zero.peg = 0.0;
        let mut floor = row_one();
        floor.peg = 0.01;
        assert_eq!(score_row(&zero, &weights), score_row(&floor, &weights));
        assert!(score_row(&zero, &weights).is_finite());
    }

    #[test]
    fn test_missing_weight_contributes_zero() {
        let mut weights = example_weights();
        weights.remove("Upside");
        let parts = breakdown(&row_one(), &weights);
        assert_eq!(contribution(&parts, Factor::Upside), 0.0);
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let weights: WeightMap = Factor::CORE
            .iter()
            .map(|f| (f.weight_key().to_string(), 0.0))
            .collect();
        let normalized = normalize_weights(&weights);
        assert_eq!(score_row(&row_one(), &normalized), 0.0);
    }

    #[test]
    fn test_lower_rating_scores_higher() {
        let weights = example_weights();
        let mut better = row_one();
        better.analyst_rating = 1.5;
        assert!(score_row(&better, &weights) > score_row(&row_one(), &weights));
    }

    #[test]
    fn test_lower_peg_scores_higher() {
        let weights = example_weights();
        let mut cheaper = row_one();
        cheaper.peg = 0.8;
        assert!(score_row(&cheaper, &weights) > score_row(&row_one(), &weights));
    }

    #[test]
    fn test_engine_normalizes_config_weights() {
        let engine = ScoreEngine::new(&ScoringConfig::default());
        let sum: f64 = engine.weights().values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(engine.alt_data().is_none());
    }

    #[test]
    fn test_engine_score_matches_free_function() {
        let config = ScoringConfig {
            weights: Some(example_weights()),
            alt_data: None,
        };
        let engine = ScoreEngine::new(&config);
        let row = sample_row("AAPL");
        let result = engine.score(&row);
        assert_eq!(result.score, score_row(&row.factors(), engine.weights()));
        assert_eq!(result.breakdown.len(), 6);
    }

    #[test]
    fn test_alt_data_adds_seventh_term() {
        let mut raw = example_weights();
        raw.insert("AltData".to_string(), 0.25);
        let config = ScoringConfig {
            weights: Some(raw),
            alt_data: Some(AltDataConfig {
                reddit: Some(SignalSettings {
                    enabled: true,
                    weight: 1.0,
                    threshold: 0.0,
                }),
                web_traffic: None,
                gex: Some(SignalSettings {
                    enabled: false,
                    weight: 1.0,
                    threshold: 0.0,
                }),
            }),
        };
        let engine = ScoreEngine::new(&config);
        let mut row = sample_row("AAPL");
        row.reddit = Some(0.8);

        let result = engine.score(&row);
        assert_eq!(result.breakdown.len(), 7);
        let alt = result
            .breakdown
            .iter()
            .find(|c| c.factor == Factor::AltData)
            .unwrap();
        assert_eq!(alt.raw, 0.8);
        assert!((alt.weight - 0.2).abs() < 1e-12);
        assert!((alt.contribution - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_alt_data_without_weight_leaves_core_score() {
        let config = ScoringConfig {
            weights: Some(example_weights()),
            alt_data: Some(AltDataConfig::default()),
        };
        let engine = ScoreEngine::new(&config);
        let mut row = sample_row("AAPL");
        row.reddit = Some(0.9);
        row.gex = Some(4.0);

        let core_engine = ScoreEngine::new(&ScoringConfig {
            weights: Some(example_weights()),
            alt_data: None,
        });
        assert_eq!(engine.score(&row).score, core_engine.score(&row).score);
    }

    #[test]
    fn test_alt_data_weight_without_block_is_ignored() {
        let mut raw = default_weights();
        raw.insert("AltData".to_string(), 50.0);
        let engine = ScoreEngine::new(&ScoringConfig {
            weights: Some(raw),
            alt_data: None,
        });
        let core_engine = ScoreEngine::new(&ScoringConfig::default());

        assert!(engine.weights().get("AltData").is_none());
        let sum: f64 = engine.weights().values().sum();
        assert!((sum - 1.0).abs() < 1e-9);

        let row = sample_row("AAPL");
        assert_eq!(engine.score(&row).score, core_engine.score(&row).score);
    }

    #[test]
    fn test_score_rows_tiers_against_set() {
        let engine = ScoreEngine::new(&ScoringConfig::default());
        let rows: Vec<StockRow> = [10.0, 20.0, 30.0, 40.0, 50.0]
            .iter()
            .enumerate()
            .map(|(i, eps)| {
                let mut row = sample_row(&format!("T{}", i));
                row.eps_growth = *eps;
                row
            })
            .collect();

        let scored = engine.score_rows(rows);
        let tiers: Vec<Tier> = scored.rows.iter().map(|r| r.tier).collect();
        assert_eq!(
            tiers,
            vec![
                Tier::BottomQuartile,
                Tier::BottomHalf,
                Tier::TopHalf,
                Tier::TopQuartile,
                Tier::TopQuartile,
            ]
        );
        assert!(scored.quartiles.is_some());
        // Input order is preserved
        assert_eq!(scored.rows[0].row.ticker, "T0");
    }

    #[test]
    fn test_score_rows_empty() {
        let engine = ScoreEngine::new(&ScoringConfig::default());
        let scored = engine.score_rows(Vec::new());
        assert!(scored.rows.is_empty());
        assert!(scored.quartiles.is_none());
    }

    #[test]
    fn test_score_rows_is_idempotent() {
        let engine = ScoreEngine::new(&ScoringConfig::default());
        let rows = vec![sample_row("A"), sample_row("B"), sample_row("C")];
        let first = engine.score_rows(rows.clone());
        let second = engine.score_rows(rows);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_by_score_breaks_ties_by_ticker() {
        let engine = ScoreEngine::new(&ScoringConfig::default());
        let mut high = sample_row("ZZZ");
        high.eps_growth = 90.0;
        let rows = vec![sample_row("MSFT"), high, sample_row("AAPL")];

        let mut scored = engine.score_rows(rows).rows;
        sort_by_score(&mut scored);
        let tickers: Vec<&str> = scored.iter().map(|r| r.row.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["ZZZ", "AAPL", "MSFT"]);
    }
}
