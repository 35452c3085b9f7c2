#[cfg(test)]
mod tests {
    use crate::config::*;
    use serial_test::serial;

    const ENV_KEYS: [&str; 4] = ["WWW_PORT", "WWW_HOST", "WWW_PREFIX", "WWW_INDEX"];

    fn clear_env() {
        for key in ENV_KEYS {
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = WwwConfig::load(&ConfigOverrides::default()).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.prefix, "/");
        assert_eq!(config.index_filename, "index.html");
    }

    #[test]
    #[serial]
    fn test_environment_overrides_defaults() {
        clear_env();
        unsafe {
            std::env::set_var("WWW_PORT", "9090");
            std::env::set_var("WWW_PREFIX", "/docs");
            std::env::set_var("WWW_INDEX", "home.html");
        }

        let config = WwwConfig::load(&ConfigOverrides::default()).unwrap();
        clear_env();

        assert_eq!(config.port, 9090);
        assert_eq!(config.prefix, "/docs/");
        assert_eq!(config.index_filename, "home.html");
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    #[serial]
    fn test_cli_overrides_environment() {
        clear_env();
        unsafe {
            std::env::set_var("WWW_PORT", "9090");
            std::env::set_var("WWW_HOST", "0.0.0.0");
        }

        let overrides = ConfigOverrides {
            port: Some(3000),
            ..ConfigOverrides::default()
        };
        let config = WwwConfig::load(&overrides).unwrap();
        clear_env();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    #[serial]
    fn test_invalid_port_in_environment_fails() {
        clear_env();
        unsafe { std::env::set_var("WWW_PORT", "not-a-port") };

        let result = WwwConfig::load(&ConfigOverrides::default());
        clear_env();

        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(crate::error::ConfigError::Extract(_)))
        ));
    }

    #[test]
    #[serial]
    fn test_traversing_index_filename_is_rejected() {
        clear_env();
        let overrides = ConfigOverrides {
            index_filename: Some("../secret.html".to_string()),
            ..ConfigOverrides::default()
        };

        assert!(WwwConfig::load(&overrides).is_err());
    }

    #[test]
    fn test_normalize_prefix() {
        assert_eq!(normalize_prefix("/"), "/");
        assert_eq!(normalize_prefix("/app"), "/app/");
        assert_eq!(normalize_prefix("app/"), "/app/");
        assert_eq!(normalize_prefix("/a/b"), "/a/b/");
    }

    #[test]
    fn test_validate_index_filename() {
        assert!(validate_index_filename("index.html").is_ok());
        assert!(validate_index_filename("default.htm").is_ok());

        assert!(validate_index_filename("").is_err());
        assert!(validate_index_filename(".").is_err());
        assert!(validate_index_filename("..").is_err());
        assert!(validate_index_filename("sub/index.html").is_err());
        assert!(validate_index_filename("..\\index.html").is_err());
        assert!(validate_index_filename("/etc/passwd").is_err());
    }

    #[test]
    fn test_validation() {
        assert!(WwwConfig::default_config().validate().is_ok());

        // Port 0 is reserved for library callers binding ephemeral ports
        assert!(WwwConfig {
            port: 0,
            ..WwwConfig::default_config()
        }
        .validate()
        .is_err());

        assert!(WwwConfig {
            host: "  ".to_string(),
            ..WwwConfig::default_config()
        }
        .validate()
        .is_err());

        // Prefix must already be normalized
        assert!(WwwConfig {
            prefix: "/docs".to_string(),
            ..WwwConfig::default_config()
        }
        .validate()
        .is_err());
    }
}
