use crate::config::types::ScanConfig;
use crate::ConfigError;

/// Validates the entire scan configuration
pub fn validate(config: &ScanConfig) -> Result<(), ConfigError> {
    validate_base_url(config)?;
    validate_limits(config)?;
    Ok(())
}

/// Validates the base URL scheme and host
fn validate_base_url(config: &ScanConfig) -> Result<(), ConfigError> {
    let scheme = config.base_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "only http and https origins are supported, got '{}'",
            scheme
        )));
    }

    if config.base_url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base URL has no host: {}",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates tolerance, concurrency, and queue bounds
fn validate_limits(config: &ScanConfig) -> Result<(), ConfigError> {
    if config.error_tolerance < 1 {
        return Err(ConfigError::Validation(
            "error_tolerance must be >= 1".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > 512 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 512, got {}",
            config.concurrency
        )));
    }

    if config.queue_capacity < config.concurrency {
        return Err(ConfigError::Validation(format!(
            "queue_capacity must be at least the worker count, got {} for {} workers",
            config.queue_capacity, config.concurrency
        )));
    }

    Ok(())
}
