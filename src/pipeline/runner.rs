//! Sequential pipeline runner
//!
//! Drives one pipeline end to end: resume or discover, then walk the task
//! list one reference at a time, checkpointing after every terminal task.
//! Task-level failures are contained; only discovery and session-setup
//! faults abort the run.

use crate::checkpoint::{export_artifacts, Checkpoint, CheckpointStore};
use crate::discover::{self, ContentReference, ReferenceKind};
use crate::extract::{self, strategy, Record};
use crate::fetch::{PageFetcher, ReadyCondition};
use crate::pipeline::task::ExtractionTask;
use crate::pipeline::PipelineKind;
use crate::politeness::PolitenessPolicy;
use crate::Result;
use rand::Rng;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Knobs a runner needs beyond its fetcher and politeness policy
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub listing_urls: Vec<Url>,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub config_hash: String,
    pub records_dir: PathBuf,
}

/// Outcome counts for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total_tasks: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub records: usize,
}

pub struct PipelineRunner<F: PageFetcher, P: PolitenessPolicy> {
    fetcher: F,
    politeness: P,
    store: CheckpointStore,
    kind: PipelineKind,
    options: RunnerOptions,
    shutdown: Arc<AtomicBool>,
}

impl<F: PageFetcher, P: PolitenessPolicy> PipelineRunner<F, P> {
    pub fn new(
        fetcher: F,
        politeness: P,
        store: CheckpointStore,
        kind: PipelineKind,
        options: RunnerOptions,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            fetcher,
            politeness,
            store,
            kind,
            options,
            shutdown,
        }
    }

    /// Runs the pipeline to completion. The session is closed on every
    /// exit path, fatal errors included.
    pub async fn run(mut self, fresh: bool) -> Result<RunReport> {
        let result = self.run_inner(fresh).await;
        if let Err(e) = self.fetcher.close().await {
            tracing::warn!(error = %e, "failed to close browsing session");
        }
        result
    }

    async fn run_inner(&mut self, fresh: bool) -> Result<RunReport> {
        let mut checkpoint = self.load_or_discover(fresh).await?;
        self.store.save(&checkpoint)?;

        let total = checkpoint.references.len();
        let start = checkpoint.resume_index();
        if start > 0 {
            tracing::info!(
                pipeline = self.kind.as_str(),
                completed = start,
                total,
                "resuming from checkpoint"
            );
        } else {
            tracing::info!(pipeline = self.kind.as_str(), total, "starting task loop");
        }

        let ready = ReadyCondition::css(strategy::ready_marker(self.kind.record_kind()));
        let mut succeeded = 0;
        let mut failed = 0;

        for index in start..total {
            if self.shutdown.load(Ordering::SeqCst) {
                tracing::info!(
                    completed = index,
                    total,
                    "shutdown requested, stopping after last completed task"
                );
                break;
            }

            let mut task = ExtractionTask::new(checkpoint.references[index].clone());
            let url = task.reference.canonical_url.clone();

            loop {
                task.begin_attempt();
                tracing::info!(
                    url = %url,
                    attempt = task.attempt_count,
                    limit = self.options.max_retries,
                    "fetching"
                );

                match self.attempt(&task.reference, &ready).await {
                    Ok(records) => {
                        tracing::info!(url = %url, records = records.len(), "task succeeded");
                        checkpoint.records.extend(records);
                        task.succeed();
                        succeeded += 1;
                        break;
                    }
                    Err(e) if e.is_retryable() => {
                        tracing::warn!(
                            url = %url,
                            attempt = task.attempt_count,
                            error = %e,
                            "attempt failed"
                        );
                        if task.record_failure(self.options.max_retries) {
                            self.backoff(task.attempt_count).await;
                        } else {
                            tracing::error!(
                                url = %url,
                                attempts = task.attempt_count,
                                "task failed, continuing with remaining tasks"
                            );
                            failed += 1;
                            break;
                        }
                    }
                    Err(e) => return Err(e),
                }
            }

            checkpoint.last_completed_task = Some(index);
            self.store.save(&checkpoint)?;

            if index + 1 < total {
                self.politeness.filler().await;
                self.politeness.pause().await;
            }
        }

        export_artifacts(&checkpoint, &self.options.records_dir)?;

        let report = RunReport {
            total_tasks: total,
            succeeded,
            failed,
            records: checkpoint.records.len(),
        };
        tracing::info!(
            pipeline = self.kind.as_str(),
            succeeded = report.succeeded,
            failed = report.failed,
            records = report.records,
            "pipeline run complete"
        );
        Ok(report)
    }

    /// One fetch-and-extract attempt against a reference
    async fn attempt(
        &mut self,
        reference: &ContentReference,
        ready: &ReadyCondition,
    ) -> Result<Vec<Record>> {
        let page = self.fetcher.fetch(&reference.canonical_url, ready).await?;
        extract::extract(&page, self.kind.record_kind())
    }

    /// Reuses a compatible checkpoint, otherwise runs discovery.
    ///
    /// Compatibility is config-hash equality: a snapshot taken under a
    /// different configuration may reference pages the current run would
    /// never have discovered.
    async fn load_or_discover(&mut self, fresh: bool) -> Result<Checkpoint> {
        if !fresh {
            match self.store.load()? {
                Some(previous) if previous.config_hash == self.options.config_hash => {
                    tracing::info!(
                        references = previous.references.len(),
                        records = previous.records.len(),
                        "compatible checkpoint found, skipping discovery"
                    );
                    return Ok(previous);
                }
                Some(_) => {
                    tracing::warn!("checkpoint was taken under a different config, rediscovering");
                }
                None => {}
            }
        }

        let references = self.discover().await?;
        tracing::info!(
            pipeline = self.kind.as_str(),
            references = references.len(),
            "discovery complete"
        );
        Ok(Checkpoint::new(self.options.config_hash.clone(), references))
    }

    /// Builds the reference list this pipeline's tasks walk.
    ///
    /// Match results read the listing pages themselves; scorecard
    /// pipelines follow listing rows to scorecards; profile pipelines add
    /// a second hop to the player anchors on each scorecard.
    async fn discover(&mut self) -> Result<Vec<ContentReference>> {
        match self.kind {
            PipelineKind::MatchResults => {
                let mut seen: HashSet<&str> = HashSet::new();
                Ok(self
                    .options
                    .listing_urls
                    .iter()
                    .filter(|u| seen.insert(u.as_str()))
                    .map(|u| ContentReference::new(u.clone(), ReferenceKind::Listing))
                    .collect())
            }
            PipelineKind::Batting | PipelineKind::Bowling => {
                discover::discover_matches(&mut self.fetcher, &self.options.listing_urls).await
            }
            PipelineKind::PlayerProfiles => {
                discover::discover_profiles(&mut self.fetcher, &self.options.listing_urls).await
            }
        }
    }

    /// Linear backoff with jitter before a retry
    async fn backoff(&self, attempt: u32) {
        let delay_ms = {
            let mut rng = rand::rng();
            self.options.retry_backoff_ms * attempt as u64 + rng.random_range(0..1000)
        };
        tracing::debug!(delay_ms, "backing off before retry");
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}
