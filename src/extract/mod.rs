//! Extraction engine: raw page content in, typed records out
//!
//! Extraction is a pure transformation. Re-running it on byte-identical
//! page content yields an identical record sequence, and nothing in here
//! performs IO.

pub mod clean;
pub mod profile;
pub mod records;
pub mod results;
pub mod scorecard;
pub mod strategy;

use crate::fetch::RawPage;
use crate::ScrapeError;

pub use clean::clean_text;
pub use records::{BattingLine, BowlingLine, MatchSummary, PlayerProfile, Record, RecordKind};

/// Extracts all records of the expected kind from a fetched page.
///
/// Malformed rows are dropped, never emitted partially; an error is
/// returned only when no top-level container strategy matches the page.
pub fn extract(page: &RawPage, kind: RecordKind) -> Result<Vec<Record>, ScrapeError> {
    match kind {
        RecordKind::MatchSummary => results::extract_match_summaries(page),
        RecordKind::Batting => scorecard::extract_batting(page),
        RecordKind::Bowling => scorecard::extract_bowling(page),
        RecordKind::Profile => profile::extract_profile(page),
    }
}
