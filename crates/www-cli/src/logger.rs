//! Logging infrastructure for the www CLI.
//!
//! Structured logging on top of the `tracing` ecosystem. Request lines,
//! subscriber lifecycle and server-side error detail all go through here;
//! nothing about the filesystem is ever sent to HTTP clients.
//!
//! # Example
//!
//! ```rust,no_run
//! use www_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("GET /index.html");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "www_cli=debug,www=debug";
/// Filter used with `--quiet`.
const QUIET_FILTER: &str = "www_cli=error,www=error";
/// Filter used when neither flag nor `RUST_LOG` is given.
const DEFAULT_FILTER: &str = "www_cli=info,www=info";

/// Initialize the tracing subscriber with the specified options.
///
/// Should be called once at the start of the program, before any logging
/// occurs.
///
/// # Verbosity Levels
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for www crates
/// 2. `--quiet` flag: ERROR only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for www crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize logger with custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // tests only exercise filter selection.

    #[test]
    fn test_verbose_filter_wins() {
        let filter = select_filter(true, true);
        assert!(filter.to_string().contains("www_cli=debug"));
    }

    #[test]
    fn test_quiet_filter() {
        let filter = select_filter(false, true);
        assert!(filter.to_string().contains("www_cli=error"));
    }
}
