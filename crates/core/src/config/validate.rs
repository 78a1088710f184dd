use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one allowed host, none of them blank
/// - Downloader binary path is set
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.downloads.allowed_hosts.is_empty() {
        return Err(ConfigError::ValidationError(
            "downloads.allowed_hosts cannot be empty".to_string(),
        ));
    }

    if config
        .downloads
        .allowed_hosts
        .iter()
        .any(|h| h.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "downloads.allowed_hosts cannot contain blank entries".to_string(),
        ));
    }

    if config.fetcher.binary_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "fetcher.binary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = Config::default();
        config.server.port = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_hosts_fails() {
        let mut config = Config::default();
        config.downloads.allowed_hosts.clear();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_blank_host_fails() {
        let mut config = Config::default();
        config.downloads.allowed_hosts.push("  ".to_string());
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_empty_binary_fails() {
        let mut config = Config::default();
        config.fetcher.binary_path = PathBuf::new();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
