use crate::config::types::{Config, PipelineConfig, PolitenessConfig, SessionConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_pipeline_config(&config.pipeline)?;
    validate_politeness_config(&config.politeness)?;
    validate_session_config(&config.session)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates pipeline configuration
fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.listing_urls.is_empty() {
        return Err(ConfigError::Validation(
            "pipeline must have at least one listing URL".to_string(),
        ));
    }

    for listing in &config.listing_urls {
        let url = Url::parse(listing)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid listing URL '{}': {}", listing, e)))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::Validation(format!(
                "Listing URL '{}' must use an HTTP(S) scheme",
                listing
            )));
        }
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

/// Validates politeness delay bounds
fn validate_politeness_config(config: &PolitenessConfig) -> Result<(), ConfigError> {
    if config.min_delay_ms > config.max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "min_delay_ms ({}) must not exceed max_delay_ms ({})",
            config.min_delay_ms, config.max_delay_ms
        )));
    }

    Ok(())
}

/// Validates session configuration
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "session must have at least one user agent string".to_string(),
        ));
    }

    if config.ready_timeout_ms < 1000 {
        return Err(ConfigError::Validation(format!(
            "ready_timeout_ms must be >= 1000ms, got {}ms",
            config.ready_timeout_ms
        )));
    }

    if config.poll_interval_ms == 0 || config.poll_interval_ms > config.ready_timeout_ms {
        return Err(ConfigError::Validation(format!(
            "poll_interval_ms must be between 1 and ready_timeout_ms, got {}ms",
            config.poll_interval_ms
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.checkpoint_path.is_empty() {
        return Err(ConfigError::Validation(
            "checkpoint_path cannot be empty".to_string(),
        ));
    }

    if config.records_dir.is_empty() {
        return Err(ConfigError::Validation(
            "records_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
