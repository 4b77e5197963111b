//! Scorecrawl: a crawl-and-extract pipeline for cricket scorecard data
//!
//! This crate discovers scorecard and player-profile URLs from tournament
//! result listings, fetches pages through a detection-resistant browsing
//! session, applies ordered selector-fallback extraction to the
//! semi-structured markup, and checkpoints accumulated records atomically
//! after every unit of work.

pub mod checkpoint;
pub mod config;
pub mod discover;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod politeness;

use thiserror::Error;

/// Main error type for scorecrawl operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No content references found at {listing_url} after trying all {strategies} selector strategies")]
    Discovery {
        listing_url: String,
        strategies: usize,
    },

    #[error("Content-ready wait timed out for {url} after {waited_ms}ms")]
    FetchTimeout { url: String, waited_ms: u64 },

    #[error("No container strategy matched page content for {url}")]
    Parse { url: String },

    #[error("Browsing session error for {url}: {message}")]
    Session { url: String, message: String },

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] checkpoint::CheckpointError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Returns true if a task hitting this error should be retried.
    ///
    /// Timeouts, whole-page parse failures, and session hiccups are
    /// transient on the target site; everything else is terminal for the
    /// run or for the task.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::FetchTimeout { .. } | Self::Parse { .. } | Self::Session { .. } | Self::Http(_)
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Missing environment variable: {0}")]
    MissingEnv(String),
}

/// Result type alias for scorecrawl operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use discover::{ContentReference, ReferenceKind};
pub use extract::{Record, RecordKind};
pub use pipeline::{PipelineKind, TaskState};
