//! Terminal output for the few human-facing lines the server prints.
//!
//! Request and lifecycle logs go through `tracing`; this module covers the
//! startup banner and the shutdown messages.

mod format;
mod messages;

pub use format::{format_banner, print_banner};
pub use messages::{info, success};

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Initialize color support based on environment.
///
/// Every message in this module is styled through `if_supports_color`, so
/// the override decides for all of them at once.
pub fn init_colors() {
    owo_colors::set_override(should_use_color());
}

/// Force plain output regardless of the environment (`--no-color`).
pub fn disable_colors() {
    owo_colors::set_override(false);
}
