//! Configuration for the www server with multi-source loading.
//!
//! Merges settings from built-in defaults, `WWW_*` environment variables and
//! command-line flags. Priority: CLI > Environment > Defaults

mod defaults;
mod loading;
mod tests;
mod validation;

use serde::{Deserialize, Serialize};

pub use defaults::*;
pub use validation::*;

/// Server configuration.
///
/// The served directory is not part of it; it is a positional argument and is
/// resolved separately before the server starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WwwConfig {
    /// TCP port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bind address (IP literal or host name)
    #[serde(default = "default_host")]
    pub host: String,

    /// URL path prefix under which files are served, always ending in `/`
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Filename tried for directory requests
    #[serde(rename = "index", default = "default_index_filename")]
    pub index_filename: String,
}

/// Values given explicitly on the command line.
///
/// Unset fields are skipped during serialization so they never shadow
/// environment variables or defaults when merged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(rename = "index", skip_serializing_if = "Option::is_none")]
    pub index_filename: Option<String>,
}

impl From<&crate::cli::Cli> for ConfigOverrides {
    fn from(args: &crate::cli::Cli) -> Self {
        Self {
            port: args.port,
            host: args.host.clone(),
            prefix: args.prefix.clone(),
            index_filename: args.index.clone(),
        }
    }
}

impl Default for WwwConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl WwwConfig {
    /// Get default configuration values.
    pub fn default_config() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            prefix: default_prefix(),
            index_filename: default_index_filename(),
        }
    }
}
