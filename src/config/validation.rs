use crate::config::types::{Config, HttpConfig, OutputConfig, PoolConfig, ServerConfig};
use crate::ConfigError;
use std::net::SocketAddr;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_pool_config(&config.pool)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_server_config(&config.server)?;
    Ok(())
}

/// Validates worker pool configuration
fn validate_pool_config(config: &PoolConfig) -> Result<(), ConfigError> {
    if config.capacity < 1 || config.capacity > 100 {
        return Err(ConfigError::Validation(format!(
            "pool capacity must be between 1 and 100, got {}",
            config.capacity
        )));
    }

    Ok(())
}

/// Validates HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| {
            ConfigError::Validation(format!(
                "bind-address '{}' is not a valid socket address: {}",
                config.bind_address, e
            ))
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            pool: PoolConfig::default(),
            http: HttpConfig::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
        }
    }

    #[test]
    fn test_defaults_validate() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = valid_config();
        config.pool.capacity = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let mut config = valid_config();
        config.pool.capacity = 500;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = valid_config();
        config.http.user_agent = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.http.request_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_output_directory_rejected() {
        let mut config = valid_config();
        config.output.directory = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_bind_address_rejected() {
        let mut config = valid_config();
        config.server.bind_address = "not-an-address".to_string();
        assert!(validate(&config).is_err());
    }
}
