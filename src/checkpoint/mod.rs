//! Checkpoint store: durable, atomic snapshots of pipeline progress
//!
//! Every snapshot is written to a temporary file in the destination
//! directory and atomically renamed over the previous one, so a crash at
//! any moment leaves either the old snapshot or the new one on disk,
//! never a truncated hybrid. The snapshot carries the discovered
//! reference list, the progress index, and all accumulated records, which
//! is exactly what a resume needs to skip Discovery.

use crate::discover::{ContentReference, ReferenceKind};
use crate::extract::{Record, RecordKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Checkpoint-specific errors
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist snapshot atomically: {0}")]
    Persist(String),
}

/// A complete, self-consistent snapshot of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Hash of the config file the run started with; a mismatch on
    /// resume invalidates the snapshot
    #[serde(rename = "configHash")]
    pub config_hash: String,

    /// Discovered references, in discovery order
    pub references: Vec<ContentReference>,

    /// Index of the last task that reached a terminal state, None before
    /// the first task completes
    #[serde(rename = "lastCompletedTask")]
    pub last_completed_task: Option<usize>,

    /// Accumulated records, in discovery order
    pub records: Vec<Record>,
}

impl Checkpoint {
    pub fn new(config_hash: String, references: Vec<ContentReference>) -> Self {
        Self {
            config_hash,
            references,
            last_completed_task: None,
            records: Vec::new(),
        }
    }

    /// Index of the first task a resumed run should execute
    pub fn resume_index(&self) -> usize {
        self.last_completed_task.map(|i| i + 1).unwrap_or(0)
    }
}

/// Persists checkpoints with write-to-temporary-then-rename semantics
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the snapshot atomically.
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        let json = serde_json::to_vec_pretty(checkpoint)?;
        write_atomic(&self.path, &json)?;
        tracing::debug!(
            path = %self.path.display(),
            records = checkpoint.records.len(),
            last_completed = ?checkpoint.last_completed_task,
            "checkpoint written"
        );
        Ok(())
    }

    /// Loads the previous snapshot, if one exists.
    ///
    /// A missing file means a fresh run; an unparsable file is an error,
    /// because atomic writes guarantee we never produce one ourselves.
    pub fn load(&self) -> Result<Option<Checkpoint>, CheckpointError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let checkpoint = serde_json::from_str(&content)?;
        Ok(Some(checkpoint))
    }
}

/// Writes one JSON artifact per record kind, plus the match-link list.
///
/// Field names inside the artifacts are the downstream contract; the
/// files themselves are plain arrays of records.
pub fn export_artifacts(
    checkpoint: &Checkpoint,
    records_dir: &Path,
) -> Result<(), CheckpointError> {
    std::fs::create_dir_all(records_dir)?;

    for kind in [
        RecordKind::MatchSummary,
        RecordKind::Batting,
        RecordKind::Bowling,
        RecordKind::Profile,
    ] {
        let values: Vec<serde_json::Value> = checkpoint
            .records
            .iter()
            .filter(|r| r.kind() == kind)
            .map(record_value)
            .collect::<Result<_, _>>()?;

        if values.is_empty() {
            continue;
        }

        let path = records_dir.join(format!("{}.json", kind.artifact_name()));
        write_atomic(&path, &serde_json::to_vec_pretty(&values)?)?;
        tracing::info!(path = %path.display(), count = values.len(), "artifact written");
    }

    let links = match_links(checkpoint);
    if !links.is_empty() {
        let path = records_dir.join("match_links.json");
        write_atomic(&path, &serde_json::to_vec_pretty(&links)?)?;
        tracing::info!(path = %path.display(), count = links.len(), "match link list written");
    }

    Ok(())
}

/// The deduplicated scorecard URL list: discovered detail references plus
/// the canonical URLs carried by match summaries
fn match_links(checkpoint: &Checkpoint) -> Vec<String> {
    let mut links = BTreeSet::new();

    for reference in &checkpoint.references {
        if reference.kind == ReferenceKind::Detail {
            links.insert(reference.canonical_url.to_string());
        }
    }
    for record in &checkpoint.records {
        if let Record::MatchSummary(summary) = record {
            links.insert(summary.canonical_url.clone());
        }
    }

    links.into_iter().collect()
}

/// Serializes the inner record without the enum tag; artifacts are
/// homogeneous per file, so the tag would be noise
fn record_value(record: &Record) -> Result<serde_json::Value, serde_json::Error> {
    match record {
        Record::MatchSummary(r) => serde_json::to_value(r),
        Record::Batting(r) => serde_json::to_value(r),
        Record::Bowling(r) => serde_json::to_value(r),
        Record::Profile(r) => serde_json::to_value(r),
    }
}

/// Temp-file-then-rename write; the temp file lives in the destination
/// directory so the rename never crosses filesystems
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CheckpointError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)?;
    }

    let mut temp = NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(path)
        .map_err(|e| CheckpointError::Persist(e.to_string()))?;

    Ok(())
}
