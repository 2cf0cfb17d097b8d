//! Core data types for SG qualification
//!
//! - `TournamentType`: the eight SG championships
//! - `ClassRank`: racer class (A1 is the top tier)
//! - `PerformanceRecord`: one racer's season statistics (input)
//! - `QualificationResult`: one racer's ranking outcome (output)
//!
//! JSON field names are camelCase to match the front-end.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Tournament Type
// ============================================================================

/// SG (Special Grade) championship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentType {
    Classic,
    AllStar,
    GrandChampion,
    OceanCup,
    Memorial,
    Derby,
    ChallengeCup,
    GrandPrix,
}

impl TournamentType {
    /// All types in calendar order
    pub const ALL: [TournamentType; 8] = [
        TournamentType::Classic,
        TournamentType::AllStar,
        TournamentType::GrandChampion,
        TournamentType::OceanCup,
        TournamentType::Memorial,
        TournamentType::Derby,
        TournamentType::ChallengeCup,
        TournamentType::GrandPrix,
    ];

    /// Wire tag, e.g. "GRAND_PRIX"
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentType::Classic => "CLASSIC",
            TournamentType::AllStar => "ALL_STAR",
            TournamentType::GrandChampion => "GRAND_CHAMPION",
            TournamentType::OceanCup => "OCEAN_CUP",
            TournamentType::Memorial => "MEMORIAL",
            TournamentType::Derby => "DERBY",
            TournamentType::ChallengeCup => "CHALLENGE_CUP",
            TournamentType::GrandPrix => "GRAND_PRIX",
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown tournament tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tournament type: {0}")]
pub struct ParseTournamentError(pub String);

impl FromStr for TournamentType {
    type Err = ParseTournamentError;

    /// Case-insensitive; accepts "grand_prix", "GRAND_PRIX", "grand-prix"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_uppercase().replace('-', "_");
        TournamentType::ALL
            .into_iter()
            .find(|t| t.as_str() == tag)
            .ok_or_else(|| ParseTournamentError(s.to_string()))
    }
}

// ============================================================================
// Class Rank
// ============================================================================

/// Racer class, A1 highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassRank {
    A1,
    A2,
    B1,
    B2,
}

impl ClassRank {
    pub fn is_top_tier(&self) -> bool {
        matches!(self, ClassRank::A1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassRank::A1 => "A1",
            ClassRank::A2 => "A2",
            ClassRank::B1 => "B1",
            ClassRank::B2 => "B2",
        }
    }
}

impl fmt::Display for ClassRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown class rank tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown class rank: {0}")]
pub struct ParseClassRankError(pub String);

impl FromStr for ClassRank {
    type Err = ParseClassRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A1" => Ok(ClassRank::A1),
            "A2" => Ok(ClassRank::A2),
            "B1" => Ok(ClassRank::B1),
            "B2" => Ok(ClassRank::B2),
            other => Err(ParseClassRankError(other.to_string())),
        }
    }
}

// ============================================================================
// Performance Record (input)
// ============================================================================

/// Season statistics for one racer
///
/// Numeric fields default to zero when absent from JSON. Optional fields are
/// only consulted by specific tournament rules and read as zero when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    pub racer_id: String,
    pub name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(rename = "rank")]
    pub class_rank: ClassRank,

    #[serde(default)]
    pub win_rate: f64,
    #[serde(default)]
    pub avg_start_timing: f64,

    #[serde(default)]
    pub sg_wins: u32,
    #[serde(default)]
    pub g1_wins: u32,
    #[serde(default)]
    pub g2_wins: u32,
    #[serde(default)]
    pub general_wins: u32,

    /// Prize money in units of 10,000 yen
    #[serde(default)]
    pub total_prize_money: i64,
    #[serde(default)]
    pub prize_ranking: Option<u32>,

    #[serde(default)]
    pub sg_appearances: u32,
    #[serde(default)]
    pub sg_final_appearances: u32,
    #[serde(default)]
    pub sg_points: i64,

    /// G2-and-above placement points (Ocean Cup primary key)
    #[serde(default)]
    pub g2_plus_points: i64,
    /// Placement points over all G2+ races (Ocean Cup tie-break)
    #[serde(default)]
    pub g2_plus_final_points: i64,

    #[serde(default)]
    pub fan_votes: Option<u64>,
    #[serde(default)]
    pub fan_vote_rank: Option<u32>,

    /// Win rate within the Derby selection period
    #[serde(default)]
    pub period_win_rate: Option<f64>,

    #[serde(default)]
    pub race_appearances: Option<u32>,
}

impl PerformanceRecord {
    /// Record with identity set and every statistic at zero
    pub fn new(racer_id: impl Into<String>, name: impl Into<String>, class_rank: ClassRank) -> Self {
        Self {
            racer_id: racer_id.into(),
            name: name.into(),
            branch: String::new(),
            class_rank,
            win_rate: 0.0,
            avg_start_timing: 0.0,
            sg_wins: 0,
            g1_wins: 0,
            g2_wins: 0,
            general_wins: 0,
            total_prize_money: 0,
            prize_ranking: None,
            sg_appearances: 0,
            sg_final_appearances: 0,
            sg_points: 0,
            g2_plus_points: 0,
            g2_plus_final_points: 0,
            fan_votes: None,
            fan_vote_rank: None,
            period_win_rate: None,
            race_appearances: None,
        }
    }

    pub fn fan_votes_or_zero(&self) -> u64 {
        self.fan_votes.unwrap_or(0)
    }

    pub fn period_win_rate_or_zero(&self) -> f64 {
        self.period_win_rate.unwrap_or(0.0)
    }

    pub fn race_appearances_or_zero(&self) -> u32 {
        self.race_appearances.unwrap_or(0)
    }
}

// ============================================================================
// Qualification Result (output)
// ============================================================================

/// Display value in `QualificationResult::stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for StatValue {
    fn from(v: i64) -> Self {
        StatValue::Int(v)
    }
}

impl From<u32> for StatValue {
    fn from(v: u32) -> Self {
        StatValue::Int(i64::from(v))
    }
}

impl From<u64> for StatValue {
    fn from(v: u64) -> Self {
        StatValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<usize> for StatValue {
    fn from(v: usize) -> Self {
        StatValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        StatValue::Float(v)
    }
}

impl From<String> for StatValue {
    fn from(v: String) -> Self {
        StatValue::Text(v)
    }
}

impl From<&str> for StatValue {
    fn from(v: &str) -> Self {
        StatValue::Text(v.to_string())
    }
}

/// Ranking outcome for one racer in one tournament
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationResult {
    pub racer_id: String,
    pub racer: PerformanceRecord,
    #[serde(rename = "sgType")]
    pub tournament: TournamentType,
    pub qualified: bool,
    pub qualification_reason: String,
    /// 1-based position in the sorted order
    pub rank: usize,
    /// Positive = inside the cutoff, negative = outside
    pub borderline_distance: f64,
    pub stats: BTreeMap<String, StatValue>,
}
