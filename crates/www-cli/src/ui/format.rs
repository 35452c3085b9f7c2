//! Startup banner formatting.

use owo_colors::{OwoColorize, Stream::Stderr};
use std::path::Path;

/// Format the startup banner without colors.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use www_cli::ui::format_banner;
///
/// let banner = format_banner(Path::new("/srv/site"), "http://127.0.0.1:8080/");
/// assert!(banner.starts_with("Serving the contents of /srv/site"));
/// assert!(banner.contains("---->  http://127.0.0.1:8080/  <----"));
/// ```
pub fn format_banner(root: &Path, url: &str) -> String {
    format!(
        "Serving the contents of {}\n\n    ---->  {}  <----\n",
        root.display(),
        url
    )
}

/// Print the startup banner to stderr, highlighting the URL.
pub fn print_banner(root: &Path, url: &str) {
    eprintln!(
        "Serving the contents of {}\n\n    ---->  {}  <----\n",
        root.display().if_supports_color(Stderr, |s| s.bold().to_string()),
        url.if_supports_color(Stderr, |s| s.cyan().underline().to_string())
    );
}
