use crate::config::WwwConfig;
use crate::error::{ConfigError, Result};
use std::path::{Component, Path};

/// Normalize a URL prefix so that it starts and ends with `/`.
///
/// # Examples
///
/// ```
/// use www_cli::config::normalize_prefix;
///
/// assert_eq!(normalize_prefix("/"), "/");
/// assert_eq!(normalize_prefix("docs"), "/docs/");
/// assert_eq!(normalize_prefix("/docs/"), "/docs/");
/// assert_eq!(normalize_prefix(""), "/");
/// ```
pub fn normalize_prefix(prefix: &str) -> String {
    let mut normalized = String::with_capacity(prefix.len() + 2);
    if !prefix.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(prefix);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

/// Validate that the index filename is a single plain path component.
///
/// Directory requests append this name to a path already proven to be inside
/// the served root, so it must not be able to climb out of it or point
/// somewhere absolute.
pub fn validate_index_filename(name: &str) -> Result<()> {
    let invalid = |hint: &str| -> Result<()> {
        Err(ConfigError::InvalidValue {
            field: "index".to_string(),
            value: name.to_string(),
            hint: hint.to_string(),
        }
        .into())
    };

    if name.is_empty() {
        return invalid("Index filename cannot be empty");
    }

    if name.contains('/') || name.contains('\\') {
        return invalid("Index filename must not contain path separators");
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => invalid("Index filename must be a plain file name such as 'index.html'"),
    }
}

impl WwwConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: self.port.to_string(),
                hint: "Choose a port between 1 and 65535".to_string(),
            }
            .into());
        }

        if self.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "host".to_string(),
                value: self.host.clone(),
                hint: "Host cannot be empty; use 127.0.0.1 to serve locally".to_string(),
            }
            .into());
        }

        if !self.prefix.starts_with('/') || !self.prefix.ends_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "prefix".to_string(),
                value: self.prefix.clone(),
                hint: "Prefix must start and end with '/'".to_string(),
            }
            .into());
        }

        validate_index_filename(&self.index_filename)
    }
}
