use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, warn};

use terminal_score::config::{self, Config};
use terminal_score::scoring::{self, ScoreEngine, ScoredSet, ScoringConfig};
use terminal_score::{data, logging, output, presets, screen};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum PresetAction {
    /// Save the configured weights under a name
    Save { name: String },
    /// List saved presets
    List,
    /// Delete a saved preset
    Remove { name: String },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score, tier and rank rows from a CSV or JSON file
    Score {
        /// Input file (defaults to `data` from the config file)
        input: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Use the weights of a saved preset
        #[arg(long)]
        preset: Option<String>,

        /// Print only the N highest-scoring rows (tiers still use the full set)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        top: Option<u64>,
    },
    /// Show how a ticker's score breaks down by factor
    Explain {
        ticker: String,

        /// Input file (defaults to `data` from the config file)
        input: Option<PathBuf>,

        /// Use the weights of a saved preset
        #[arg(long)]
        preset: Option<String>,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,

        /// Prompt for each factor weight
        #[arg(short, long)]
        interactive: bool,
    },
    /// Manage saved weight presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },
}

#[derive(Parser, Debug)]
#[command(name = "terminal-score")]
#[command(about = "Stock screener composite scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/terminal-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn exit_with(code: i32, message: impl Display) -> ! {
    eprintln!("{}", message);
    std::process::exit(code);
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    match cli.command {
        Commands::Score {
            input,
            format,
            preset,
            top,
        } => {
            let config = load_validated_config(config_path);
            let scored = screen_and_score(&config, input, preset.as_deref());
            let mut rows = scored.rows;
            scoring::sort_by_score(&mut rows);
            let total = rows.len();
            if let Some(n) = top {
                rows.truncate(usize::try_from(n).unwrap_or(usize::MAX));
            }

            match format {
                OutputFormat::Table => {
                    let today = chrono::Local::now().date_naive();
                    println!("{}", output::format_header(total, today));
                    println!();
                    let use_colors = output::should_use_colors();
                    println!("{}", output::format_scored_table(&rows, use_colors));
                }
                OutputFormat::Tsv => println!("{}", output::format_tsv(&rows)),
                OutputFormat::Json => match output::format_json(&rows) {
                    Ok(json) => println!("{}", json),
                    Err(e) => exit_with(EXIT_DATA, format!("Output error: {:#}", e)),
                },
            }
        }
        Commands::Explain {
            ticker,
            input,
            preset,
        } => {
            let config = load_validated_config(config_path);
            let scored = screen_and_score(&config, input, preset.as_deref());
            let total = scored.rows.len();
            let Some(row) = scored
                .rows
                .iter()
                .find(|r| r.row.ticker.eq_ignore_ascii_case(&ticker))
            else {
                exit_with(
                    EXIT_DATA,
                    format!("Ticker {} not found among {} screened rows", ticker, total),
                );
            };
            let use_colors = output::should_use_colors();
            println!(
                "{}",
                output::format_breakdown(row, scored.quartiles.as_ref(), use_colors)
            );
        }
        Commands::Init { force, interactive } => run_init(config_path, force, interactive),
        Commands::Preset { action } => run_preset(&load_validated_config(config_path), action),
    }

    std::process::exit(EXIT_SUCCESS);
}

fn load_validated_config(path: Option<PathBuf>) -> Config {
    let config = match config::load_config(path) {
        Ok(c) => c,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    // Validate config at startup
    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    config
}

/// Load rows, apply filters, and score what remains.
fn screen_and_score(config: &Config, input: Option<PathBuf>, preset: Option<&str>) -> ScoredSet {
    let scoring = match preset {
        Some(name) => scoring_with_preset(config.effective_scoring(), name),
        None => config.effective_scoring(),
    };

    let Some(path) = input.or_else(|| config.data.clone()) else {
        exit_with(
            EXIT_CONFIG,
            "No input file. Pass one on the command line or set `data` in the config file.",
        );
    };

    let rows = match data::load_rows(&path) {
        Ok(rows) => rows,
        Err(e) => exit_with(EXIT_DATA, format!("Data error: {}", e)),
    };
    let loaded = rows.len();

    let rows = screen::filter_rows(rows, &config.effective_filters());
    debug!(loaded, kept = rows.len(), "applied filters");
    if loaded > 0 && rows.is_empty() {
        warn!("filters excluded all {} rows", loaded);
    }

    ScoreEngine::new(&scoring).score_rows(rows)
}

fn scoring_with_preset(mut scoring: ScoringConfig, name: &str) -> ScoringConfig {
    let store = match presets::get_presets_path().and_then(|p| presets::load_presets(&p)) {
        Ok(store) => store,
        Err(e) => exit_with(EXIT_CONFIG, format!("Preset error: {:#}", e)),
    };
    let Some(preset) = store.get(name) else {
        exit_with(EXIT_CONFIG, format!("No preset named '{}'", name));
    };
    debug!(preset = name, "using preset weights");
    scoring.weights = Some(preset.weights.clone());

    if let Err(errors) = scoring::validate_scoring(&scoring) {
        eprintln!("Preset '{}' is invalid:", name);
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    scoring
}

fn run_init(config_path: Option<PathBuf>, force: bool, interactive: bool) {
    let path = match config_path.map(Ok).unwrap_or_else(config::get_config_path) {
        Ok(p) => p,
        Err(e) => exit_with(EXIT_CONFIG, format!("Config error: {:#}", e)),
    };

    let mut starter = config::init::starter_config();
    if interactive {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut out = std::io::stdout();
        match config::init::prompt_weights(&mut input, &mut out) {
            Ok(weights) => {
                starter.scoring = Some(ScoringConfig {
                    weights: Some(weights),
                    alt_data: None,
                })
            }
            Err(e) => exit_with(EXIT_CONFIG, format!("Init error: {:#}", e)),
        }
    }

    if let Err(e) = config::write_default_config(&path, &starter, force) {
        exit_with(EXIT_CONFIG, format!("Init error: {:#}", e));
    }
    println!("Wrote config to {}", path.display());
}

fn run_preset(config: &Config, action: PresetAction) {
    let path = match presets::get_presets_path() {
        Ok(p) => p,
        Err(e) => exit_with(EXIT_CONFIG, format!("Preset error: {:#}", e)),
    };
    let mut store = match presets::load_presets(&path) {
        Ok(s) => s,
        Err(e) => exit_with(EXIT_CONFIG, format!("Preset error: {:#}", e)),
    };

    match action {
        PresetAction::Save { name } => {
            let weights = config.effective_scoring().raw_weights();
            let replaced = store.save(name.clone(), weights);
            if let Err(e) = presets::save_presets(&path, &store) {
                exit_with(EXIT_CONFIG, format!("Preset error: {:#}", e));
            }
            let verb = if replaced { "Updated" } else { "Saved" };
            println!("{} preset '{}'", verb, name);
        }
        PresetAction::List => {
            if store.presets.is_empty() {
                println!("No presets saved.");
                return;
            }
            for (name, preset) in store.list() {
                let normalized = scoring::normalize_weights(&preset.weights);
                let weights = normalized
                    .iter()
                    .map(|(k, v)| format!("{}={:.2}", k, v))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!(
                    "{}  ({})  {}",
                    name,
                    preset.saved_at.format("%Y-%m-%d %H:%M"),
                    weights
                );
            }
        }
        PresetAction::Remove { name } => {
            if !store.remove(&name) {
                exit_with(EXIT_CONFIG, format!("No preset named '{}'", name));
            }
            if let Err(e) = presets::save_presets(&path, &store) {
                exit_with(EXIT_CONFIG, format!("Preset error: {:#}", e));
            }
            println!("Removed preset '{}'", name);
        }
    }
}
