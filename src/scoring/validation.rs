use super::altdata::AltSignal;
use super::config::ScoringConfig;
use super::factors::Factor;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref weights) = config.weights {
        for (key, weight) in weights {
            if Factor::from_weight_key(key).is_none() {
                let known: Vec<&str> = Factor::ALL.iter().map(|f| f.weight_key()).collect();
                errors.push(format!(
                    "scoring.weights.{}: unknown factor (expected one of {})",
                    key,
                    known.join(", ")
                ));
            }
            if !weight.is_finite() {
                errors.push(format!("scoring.weights.{}: must be a finite number", key));
            } else if *weight < 0.0 {
                errors.push(format!("scoring.weights.{}: must be non-negative", key));
            }
        }

        let total: f64 = weights.values().sum();
        if weights.values().all(|w| w.is_finite()) && !total.is_finite() {
            errors.push("scoring.weights: sum of weights must be finite".to_string());
        }
    }

    if let Some(ref alt_data) = config.alt_data {
        let configured = [
            ("reddit", AltSignal::Reddit, alt_data.reddit.is_some()),
            ("web_traffic", AltSignal::WebTraffic, alt_data.web_traffic.is_some()),
            ("gex", AltSignal::Gex, alt_data.gex.is_some()),
        ];
        for (name, signal, present) in configured {
            if !present {
                continue;
            }
            let settings = signal.settings(alt_data);
            if !settings.weight.is_finite() || settings.weight < 0.0 {
                errors.push(format!(
                    "scoring.alt_data.{}.weight: must be a non-negative number",
                    name
                ));
            }
            if !settings.threshold.is_finite() {
                errors.push(format!(
                    "scoring.alt_data.{}.threshold: must be a finite number",
                    name
                ));
            }
        }

        let enabled: Vec<f64> = AltSignal::ALL
            .iter()
            .map(|signal| signal.settings(alt_data))
            .filter(|settings| settings.enabled)
            .map(|settings| settings.weight)
            .collect();
        let total: f64 = enabled.iter().sum();
        if enabled.iter().all(|w| w.is_finite()) && !total.is_finite() {
            errors.push("scoring.alt_data: sum of enabled signal weights must be finite".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
