//! Scorecrawl main entry point
//!
//! Command-line interface for the scorecard crawl-and-extract pipelines.

use clap::{Parser, Subcommand};
use scorecrawl::checkpoint::CheckpointStore;
use scorecrawl::config::{load_config_with_hash, resolve_gateway_credentials, Config};
use scorecrawl::fetch::HttpSession;
use scorecrawl::pipeline::{PipelineKind, PipelineRunner, RunnerOptions};
use scorecrawl::politeness::RandomizedPolicy;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Scorecrawl: a crawl-and-extract pipeline for cricket scorecard data
///
/// Scorecrawl discovers scorecard and player-profile pages from result
/// listings, extracts typed records with selector-fallback parsing, and
/// checkpoints progress so interrupted runs resume without re-discovery.
#[derive(Parser, Debug)]
#[command(name = "scorecrawl")]
#[command(version = "1.0.0")]
#[command(about = "Crawl and extract cricket match, innings, and player data", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    #[command(subcommand)]
    pipeline: PipelineCommand,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Ignore any existing checkpoint and rediscover from scratch
    #[arg(long, global = true)]
    fresh: bool,
}

/// Which extraction pipeline to run
#[derive(Subcommand, Debug, Clone, Copy)]
enum PipelineCommand {
    /// Extract match summaries from the result listings
    MatchResults,
    /// Extract per-innings batting lines from each scorecard
    Batting,
    /// Extract per-innings bowling lines from each scorecard
    Bowling,
    /// Extract player profiles linked from each scorecard
    PlayerProfiles,
}

impl From<PipelineCommand> for PipelineKind {
    fn from(command: PipelineCommand) -> Self {
        match command {
            PipelineCommand::MatchResults => PipelineKind::MatchResults,
            PipelineCommand::Batting => PipelineKind::Batting,
            PipelineCommand::Bowling => PipelineKind::Bowling,
            PipelineCommand::PlayerProfiles => PipelineKind::PlayerProfiles,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let kind = PipelineKind::from(cli.pipeline);
    match run_pipeline(config, config_hash, kind, cli.fresh).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("scorecrawl=info,warn"),
            1 => EnvFilter::new("scorecrawl=debug,info"),
            2 => EnvFilter::new("scorecrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Wires the session, politeness policy, and checkpoint store together and
/// runs the chosen pipeline to completion
async fn run_pipeline(
    config: Config,
    config_hash: String,
    kind: PipelineKind,
    fresh: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if fresh {
        tracing::info!("Starting fresh run (ignoring previous checkpoint)");
    }

    // Gateway credentials are read from the environment exactly once, up
    // front; a missing variable fails the run before any fetch happens.
    let gateway = if config.session.use_gateway {
        Some(resolve_gateway_credentials()?)
    } else {
        None
    };

    let listing_urls = config
        .pipeline
        .listing_urls
        .iter()
        .map(|raw| Url::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::info!(
        pipeline = kind.as_str(),
        listings = listing_urls.len(),
        "pipeline selected"
    );

    let fetcher = HttpSession::new(&config.session, gateway.as_ref())?;
    let politeness = RandomizedPolicy::from_config(&config.politeness);
    let store = CheckpointStore::new(&config.output.checkpoint_path);

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_signal = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, finishing current task before stopping");
            shutdown_signal.store(true, Ordering::SeqCst);
        }
    });

    let options = RunnerOptions {
        listing_urls,
        max_retries: config.pipeline.max_retries,
        retry_backoff_ms: config.pipeline.retry_backoff_ms,
        config_hash,
        records_dir: PathBuf::from(&config.output.records_dir),
    };

    let runner = PipelineRunner::new(fetcher, politeness, store, kind, options, shutdown);
    let report = runner.run(fresh).await?;

    // Per-task failures are reported but do not fail the process; the
    // artifacts for every succeeded task were written regardless.
    tracing::info!(
        "Run finished: {}/{} tasks succeeded, {} records",
        report.succeeded,
        report.total_tasks,
        report.records
    );
    if report.failed > 0 {
        tracing::warn!("{} tasks exhausted their retry budget", report.failed);
    }

    Ok(())
}
