//! Configuration module for scorecrawl
//!
//! Handles loading, parsing, and validating TOML configuration files, plus
//! one-time resolution of gateway credentials from the environment.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, GatewayCredentials, OutputConfig, PipelineConfig, PolitenessConfig, SessionConfig,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, resolve_gateway_credentials,
};
