use serde::Deserialize;

/// Main configuration structure for scorecrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub politeness: PolitenessConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub output: OutputConfig,
}

/// Pipeline behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Listing URLs to discover scorecard links from
    #[serde(rename = "listing-urls")]
    pub listing_urls: Vec<String>,

    /// Maximum fetch attempts per task before it is marked Failed
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay before a retry attempt (milliseconds); grows linearly
    /// with the attempt count
    #[serde(rename = "retry-backoff-ms", default = "default_retry_backoff")]
    pub retry_backoff_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff() -> u64 {
    5_000
}

/// Inter-request delay and filler interaction bounds
#[derive(Debug, Clone, Deserialize)]
pub struct PolitenessConfig {
    /// Minimum delay between consecutive fetches (milliseconds)
    #[serde(rename = "min-delay-ms")]
    pub min_delay_ms: u64,

    /// Maximum delay between consecutive fetches (milliseconds)
    #[serde(rename = "max-delay-ms")]
    pub max_delay_ms: u64,

    /// Upper bound on filler interaction bursts per page
    #[serde(rename = "filler-bursts", default = "default_filler_bursts")]
    pub filler_bursts: u32,
}

fn default_filler_bursts() -> u32 {
    5
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        // Pacing the target site tolerates without rate limiting
        Self {
            min_delay_ms: 3000,
            max_delay_ms: 8000,
            filler_bursts: default_filler_bursts(),
        }
    }
}

/// Browsing session configuration
///
/// Identity rotation and header shaping are evasion knobs only; they must
/// never change what gets extracted from a page.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// User agent strings rotated per request
    #[serde(rename = "user-agents", default = "default_user_agents")]
    pub user_agents: Vec<String>,

    /// Bound on the content-ready wait (milliseconds)
    #[serde(rename = "ready-timeout-ms", default = "default_ready_timeout")]
    pub ready_timeout_ms: u64,

    /// Interval between content-ready polls (milliseconds)
    #[serde(rename = "poll-interval-ms", default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Route requests through the scraping-browser gateway; credentials are
    /// resolved once from the environment at process start
    #[serde(rename = "use-gateway", default)]
    pub use_gateway: bool,
}

fn default_user_agents() -> Vec<String> {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36".to_string(),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/113.0.0.0 Safari/537.36".to_string(),
    ]
}

fn default_ready_timeout() -> u64 {
    20_000
}

fn default_poll_interval() -> u64 {
    1_500
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agents: default_user_agents(),
            ready_timeout_ms: default_ready_timeout(),
            poll_interval_ms: default_poll_interval(),
            use_gateway: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the checkpoint snapshot file
    #[serde(rename = "checkpoint-path")]
    pub checkpoint_path: String,

    /// Directory the per-kind record artifacts are written to
    #[serde(rename = "records-dir")]
    pub records_dir: String,
}

/// Scraping-browser gateway credentials, resolved once from the environment
#[derive(Debug, Clone)]
pub struct GatewayCredentials {
    pub customer_id: String,
    pub zone: String,
    pub password: String,
    pub host: String,
    pub port: String,
}

impl GatewayCredentials {
    /// Composes the authenticated proxy endpoint URL
    pub fn endpoint(&self) -> String {
        format!(
            "http://brd-customer-{}-zone-{}:{}@{}:{}",
            self.customer_id, self.zone, self.password, self.host, self.port
        )
    }
}
