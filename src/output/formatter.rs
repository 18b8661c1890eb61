use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Quartiles, ScoredRow, Tier};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a number in compact notation (847, 1.5k, 2.3M, 4.1B, 1T)
pub fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let formatted = if magnitude >= 1e12 {
        format!("{:.1}T", value / 1e12)
    } else if magnitude >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.1}k", value / 1e3)
    } else {
        format!("{:.0}", value)
    };

    // Trim trailing .0 (e.g., "1.0k" -> "1k")
    formatted
        .replace(".0T", "T")
        .replace(".0B", "B")
        .replace(".0M", "M")
        .replace(".0k", "k")
}

pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Tier label, padded to `width` and colored by rank when requested.
pub fn format_tier(tier: Tier, width: usize, use_colors: bool) -> String {
    let padded = format!("{:<width$}", tier.label(), width = width);
    if !use_colors {
        return padded;
    }
    match tier {
        Tier::TopQuartile => padded.green().bold().to_string(),
        Tier::TopHalf => padded.cyan().to_string(),
        Tier::BottomHalf => padded.yellow().to_string(),
        Tier::BottomQuartile => padded.red().to_string(),
    }
}

/// Summary line shown above the table.
pub fn format_header(total: usize, date: NaiveDate) -> String {
    format!("Total Results: {}  Date: {}", total, date.format("%Y-%m-%d"))
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

const TIER_WIDTH: usize = 10;
const SECTOR_MIN_WIDTH: usize = 8;

/// Format scored rows as a table, in the order given.
///
/// Columns follow the dashboard layout. The sector column takes whatever
/// width is left on a terminal and is not truncated when piped.
pub fn format_scored_table(rows: &[ScoredRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No rows matched.".to_string();
    }

    let header = format!(
        "{:>3} {:<8} {:>8}  {:<tw$}  {:>9} {:>6} {:>6} {:>7} {:>7} {:>9} {:>10} {:>9} {:>6}  {}",
        "#",
        "Ticker",
        "Score",
        "Tier",
        "Price",
        "PEG",
        "PE",
        "EPSGr",
        "MktCap",
        "AnalystSc",
        "TrgtUpside",
        "InsiderSc",
        "SentSc",
        "Sector",
        tw = TIER_WIDTH,
    );
    let fixed_width = header.chars().count() - "Sector".len();
    let sector_width = get_terminal_width()
        .map(|w| w.saturating_sub(fixed_width).max(SECTOR_MIN_WIDTH));

    let lines = rows.iter().enumerate().map(|(idx, scored)| {
        let row = &scored.row;
        let index_str = format!("{:>2}.", idx + 1);
        let score_str = format!("{:>8}", format_score(scored.score));
        let sector = row.sector.as_deref().unwrap_or("-");
        let sector = match sector_width {
            Some(width) => truncate(sector, width),
            None => sector.to_string(),
        };
        let rest = format!(
            "{:>9} {:>6} {:>6} {:>7} {:>7} {:>9} {:>10} {:>9} {:>6}  {}",
            format_optional(row.price, 2),
            format!("{:.2}", row.peg),
            format_optional(row.pe, 1),
            format!("{:.1}", row.eps_growth),
            row.market_cap.map(format_compact).unwrap_or_else(|| "-".to_string()),
            format!("{:.1}", row.analyst_rating),
            format!("{:.1}", row.target_upside),
            format!("{:.2}", row.insider_depth),
            format!("{:.2}", row.sentiment),
            sector,
        );
        let tier = format_tier(scored.tier, TIER_WIDTH, use_colors);

        if use_colors {
            format!(
                "{} {:<8} {}  {}  {}",
                index_str.dimmed(),
                row.ticker.bold(),
                score_str.bold(),
                tier,
                rest
            )
        } else {
            format!(
                "{} {:<8} {}  {}  {}",
                index_str, row.ticker, score_str, tier, rest
            )
        }
    });

    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };

    std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scored rows as tab-separated values for scripting
/// Columns: score, tier, ticker (no headers, no colors)
pub fn format_tsv(rows: &[ScoredRow]) -> String {
    rows.iter()
        .map(|scored| {
            format!(
                "{:.4}\t{:?}\t{}",
                scored.score, scored.tier, scored.row.ticker
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format scored rows as a pretty-printed JSON array
pub fn format_json(rows: &[ScoredRow]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Failed to serialize scored rows")
}

/// Multi-line per-factor explanation of one row's score.
pub fn format_breakdown(
    scored: &ScoredRow,
    quartiles: Option<&Quartiles>,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    let title = format!("{}  score {}", scored.row.ticker, format_score(scored.score));
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });
    lines.push(format!(
        "  Tier: {}",
        format_tier(scored.tier, 0, use_colors)
    ));
    if let Some(q) = quartiles {
        lines.push(format!(
            "  Quartiles: q1 {:.4}  q2 {:.4}  q3 {:.4}",
            q.q1, q.q2, q.q3
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "  {:<15} {:>12} {:>12} {:>8} {:>12}",
        "Factor", "Raw", "Transformed", "Weight", "Contribution"
    ));
    for part in &scored.breakdown {
        lines.push(format!(
            "  {:<15} {:>12.4} {:>12.4} {:>8.4} {:>12.4}",
            part.factor.label(),
            part.raw,
            part.transformed,
            part.weight,
            part.contribution
        ));
    }
    let total: f64 = scored.breakdown.iter().map(|c| c.contribution).sum();
    lines.push(format!("  {:<15} {:>47.4}", "Total", total));

    lines.join("\n")
}
