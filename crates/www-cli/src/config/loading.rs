use crate::config::{normalize_prefix, ConfigOverrides, WwwConfig};
use crate::error::{ConfigError, Result};
use figment::{
    providers::{Env, Serialized},
    Figment,
};

/// Prefix of the environment variables read by [`WwwConfig::load`].
pub const ENV_PREFIX: &str = "WWW_";

impl WwwConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > defaults
    ///
    /// The returned configuration has a normalized prefix and has been
    /// validated.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let mut config: Self = Self::figment(overrides)
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))?;

        config.prefix = normalize_prefix(&config.prefix);
        config.validate()?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Build the layered provider stack without extracting it.
    pub(crate) fn figment(overrides: &ConfigOverrides) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default_config()))
            // WWW_PORT, WWW_HOST, WWW_PREFIX, WWW_INDEX
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
    }
}
