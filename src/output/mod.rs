pub mod formatter;

pub use formatter::{
    format_breakdown, format_compact, format_header, format_json, format_score,
    format_scored_table, format_tier, format_tsv, should_use_colors,
};
