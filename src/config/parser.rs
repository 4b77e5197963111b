use crate::config::types::{Config, GatewayCredentials};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = toml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Stored in the checkpoint so a resume against a changed configuration is
/// detected and the run starts fresh instead of mixing incompatible state.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Resolves scraping-browser gateway credentials from the environment
///
/// Called exactly once at process start; the resulting struct is passed down
/// explicitly so nothing mid-run reads ambient state.
///
/// Expects `SCRAPE_GATEWAY_CUSTOMER_ID`, `SCRAPE_GATEWAY_ZONE`,
/// `SCRAPE_GATEWAY_PASSWORD`, `SCRAPE_GATEWAY_HOST`, `SCRAPE_GATEWAY_PORT`.
pub fn resolve_gateway_credentials() -> Result<GatewayCredentials, ConfigError> {
    fn var(name: &str) -> Result<String, ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnv(name.to_string()))
    }

    Ok(GatewayCredentials {
        customer_id: var("SCRAPE_GATEWAY_CUSTOMER_ID")?,
        zone: var("SCRAPE_GATEWAY_ZONE")?,
        password: var("SCRAPE_GATEWAY_PASSWORD")?,
        host: var("SCRAPE_GATEWAY_HOST")?,
        port: var("SCRAPE_GATEWAY_PORT")?,
    })
}
