use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use super::Config;
use crate::scoring::{default_weights, Factor, ScoringConfig, WeightMap, DEFAULT_RAW_WEIGHT};
use crate::screen::FilterConfig;

const HEADER: &str = "\
# terminal-score configuration
#
# scoring.weights are raw slider values (any non-negative scale); they are
# normalized to sum to 1 before scoring. Leave a factor out to give it weight 0.
# filters take inclusive { min, max } bounds on price, peg, pe, eps_growth,
# analyst_rating, target_upside, market_cap and volume_30d, plus the
# us_only / nasdaq_only / nyse_only toggles.
";

/// Render a config as commented YAML.
pub fn default_config_yaml(config: &Config) -> Result<String> {
    let body = serde_saphyr::to_string(config).context("Failed to serialize config")?;
    Ok(format!("{}\n{}", HEADER, body))
}

/// Write a config file atomically.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_default_config(path: &Path, config: &Config, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let yaml = default_config_yaml(config)?;
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}

/// Config with every section filled in at its defaults.
pub fn starter_config() -> Config {
    Config {
        data: None,
        scoring: Some(ScoringConfig::default()),
        filters: Some(FilterConfig::default()),
    }
}

/// Prompt user with a message and return their trimmed input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush stdout")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Ask for each core factor weight, re-prompting until the answer is a
/// non-negative number. Empty input keeps the default.
pub fn prompt_weights<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<WeightMap> {
    writeln!(
        output,
        "Weights are relative: they are normalized to sum to 1 before scoring."
    )?;

    let mut weights = default_weights();
    for factor in Factor::CORE {
        let weight = loop {
            let message = format!("{} weight [{}]: ", factor.label(), DEFAULT_RAW_WEIGHT);
            let answer = prompt(input, output, &message)?;
            if answer.is_empty() {
                break DEFAULT_RAW_WEIGHT;
            }
            match answer.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => break v,
                _ => writeln!(output, "  Invalid: must be a non-negative number. Try again.")?,
            }
        };
        weights.insert(factor.weight_key().to_string(), weight);
    }
    Ok(weights)
}
