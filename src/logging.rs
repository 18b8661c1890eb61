//! Logging initialization.
//!
//! Logs go to stderr so stdout stays clean for table/TSV/JSON output.
//! `RUST_LOG` takes precedence over the `--verbose` flag.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "terminal_score=debug"
    } else {
        "terminal_score=warn"
    }
}

/// Install the global subscriber. Call once, from the binary.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), "terminal_score=debug");
        assert_eq!(default_filter(false), "terminal_score=warn");
    }
}
