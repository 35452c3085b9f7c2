//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::RootUnavailable { path, source } => miette::miette!(
            help = "Pass an existing, readable directory as the first argument",
            "There was an error attempting to access {}: {}",
            path.display(),
            source
        ),
        CliError::NotADirectory(path) => miette::miette!(
            help = "Pass a directory, not a file, as the first argument",
            "There was an error attempting to access {}: not a directory",
            path.display()
        ),
        CliError::Config(e) => config_error_to_miette(e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert ConfigError to miette Report
fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::InvalidValue { field, value, hint } => miette::miette!(
            help = hint,
            "Invalid value for '{}': {}",
            field,
            value
        ),
        ConfigError::Extract(e) => miette::miette!(
            help = "Check the WWW_* environment variables and command-line flags",
            "Failed to load configuration: {}",
            e
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_root_unavailable_report_mentions_path() {
        let report = cli_error_to_miette(CliError::NotADirectory(PathBuf::from("/tmp/file")));
        assert!(report.to_string().contains("/tmp/file"));
    }

    #[test]
    fn test_invalid_value_report_keeps_field() {
        let report = cli_error_to_miette(
            ConfigError::InvalidValue {
                field: "index".to_string(),
                value: "../secret".to_string(),
                hint: "Use a bare filename".to_string(),
            }
            .into(),
        );
        assert!(report.to_string().contains("'index'"));
    }
}
