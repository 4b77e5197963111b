//! Pipeline orchestration: task lifecycle and the sequential runner

pub mod runner;
pub mod task;

pub use runner::{PipelineRunner, RunReport, RunnerOptions};
pub use task::{ExtractionTask, TaskState};

use crate::extract::RecordKind;

/// The four extraction pipelines the crawler can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    MatchResults,
    Batting,
    Bowling,
    PlayerProfiles,
}

impl PipelineKind {
    /// The record kind this pipeline's tasks extract
    pub fn record_kind(&self) -> RecordKind {
        match self {
            Self::MatchResults => RecordKind::MatchSummary,
            Self::Batting => RecordKind::Batting,
            Self::Bowling => RecordKind::Bowling,
            Self::PlayerProfiles => RecordKind::Profile,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MatchResults => "match-results",
            Self::Batting => "batting",
            Self::Bowling => "bowling",
            Self::PlayerProfiles => "player-profiles",
        }
    }
}
