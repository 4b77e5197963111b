//! Typed records produced by the extraction engine
//!
//! Serialized field names are a contract with the downstream analytics
//! layer and must not be renamed without a schema version bump.

use serde::{Deserialize, Serialize};

/// The kind of record a page is expected to yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    MatchSummary,
    Batting,
    Bowling,
    Profile,
}

impl RecordKind {
    /// Base name of the artifact file this kind is exported to
    pub fn artifact_name(&self) -> &'static str {
        match self {
            Self::MatchSummary => "match_results",
            Self::Batting => "batting_summary",
            Self::Bowling => "bowling_summary",
            Self::Profile => "player_profiles",
        }
    }
}

/// A single extracted record, immutable once emitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Record {
    MatchSummary(MatchSummary),
    Batting(BattingLine),
    Bowling(BowlingLine),
    Profile(PlayerProfile),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::MatchSummary(_) => RecordKind::MatchSummary,
            Self::Batting(_) => RecordKind::Batting,
            Self::Bowling(_) => RecordKind::Bowling,
            Self::Profile(_) => RecordKind::Profile,
        }
    }
}

/// One match result row from the tournament listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub team1: String,
    pub team2: String,
    pub winner: String,
    pub margin: String,
    pub ground: String,
    #[serde(rename = "matchDate")]
    pub match_date: String,
    #[serde(rename = "canonicalURL")]
    pub canonical_url: String,
}

/// One batsman's line from a scorecard innings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingLine {
    #[serde(rename = "matchRef")]
    pub match_ref: String,
    #[serde(rename = "teamInnings")]
    pub team_innings: String,
    #[serde(rename = "battingPosition")]
    pub batting_position: u32,
    #[serde(rename = "playerName")]
    pub player_name: String,
    #[serde(rename = "dismissalText")]
    pub dismissal_text: Option<String>,
    pub runs: Option<u32>,
    pub balls: Option<u32>,
    pub fours: Option<u32>,
    pub sixes: Option<u32>,
    #[serde(rename = "strikeRate")]
    pub strike_rate: Option<f64>,
}

/// One bowler's line from a scorecard bowling table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingLine {
    #[serde(rename = "matchRef")]
    pub match_ref: String,
    #[serde(rename = "bowlingTeam")]
    pub bowling_team: String,
    #[serde(rename = "playerName")]
    pub player_name: String,
    pub overs: Option<f64>,
    pub maidens: Option<u32>,
    pub runs: Option<u32>,
    pub wickets: Option<u32>,
    pub economy: Option<f64>,
    pub dots: Option<u32>,
    pub fours: Option<u32>,
    pub sixes: Option<u32>,
    pub wides: Option<u32>,
    #[serde(rename = "noBalls")]
    pub no_balls: Option<u32>,
}

/// A player's biography page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub team: Option<String>,
    #[serde(rename = "battingStyle")]
    pub batting_style: Option<String>,
    #[serde(rename = "bowlingStyle")]
    pub bowling_style: Option<String>,
    #[serde(rename = "playingRole")]
    pub playing_role: Option<String>,
    #[serde(rename = "bioText")]
    pub bio_text: Option<String>,
    #[serde(rename = "canonicalURL")]
    pub canonical_url: String,
}
