//! Qualification Criteria Table
//!
//! Static per-tournament configuration: slot counts, borderline position,
//! the published selection rules, and past borderline values.
//!
//! Only `total_slots` and `borderline_index` feed the evaluator. The
//! per-criterion slot breakdown mirrors the published rules and is not
//! enforced (see DESIGN.md, "Per-criterion slots").

use crate::types::TournamentType;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::{smallvec, SmallVec};
use SlotAllocation::{Fixed, Remaining};

/// Borderline reference position for 52-slot tournaments (52nd racer)
pub const DEFAULT_BORDERLINE_INDEX: usize = 51;

/// Borderline reference position for the Grand Prix (18th racer)
pub const GRAND_PRIX_BORDERLINE_INDEX: usize = 17;

/// Slots granted by one selection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAllocation {
    Fixed(u32),
    /// Whatever is left after higher-priority rules
    Remaining,
}

impl Serialize for SlotAllocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SlotAllocation::Fixed(n) => serializer.serialize_u32(*n),
            SlotAllocation::Remaining => serializer.serialize_str("remaining"),
        }
    }
}

impl<'de> Deserialize<'de> for SlotAllocation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u32),
            Word(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => Ok(SlotAllocation::Fixed(n)),
            Raw::Word(w) if w == "remaining" => Ok(SlotAllocation::Remaining),
            Raw::Word(w) => Err(serde::de::Error::custom(format!(
                "expected slot count or \"remaining\", got {:?}",
                w
            ))),
        }
    }
}

/// One published selection rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionEntry {
    /// 1 = highest priority
    pub priority: u32,
    pub description: String,
    pub slots: SlotAllocation,
    pub method: String,
}

/// Historical borderline (informational)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderlineEntry {
    pub year: i32,
    pub value: String,
}

/// Selection configuration for one tournament type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationCriteria {
    #[serde(rename = "sgType")]
    pub tournament: TournamentType,
    pub name: String,
    pub selection_period: String,
    /// Cutoff: sorted index < total_slots qualifies
    pub total_slots: usize,
    /// Sorted position of the borderline reference racer (clamped to the list)
    pub borderline_index: usize,
    pub criteria: SmallVec<[CriterionEntry; 6]>,
    pub borderline_history: Vec<BorderlineEntry>,
}

fn rule(priority: u32, description: &str, slots: SlotAllocation, method: &str) -> CriterionEntry {
    CriterionEntry {
        priority,
        description: description.to_string(),
        slots,
        method: method.to_string(),
    }
}

fn history(entries: &[(i32, &str)]) -> Vec<BorderlineEntry> {
    entries
        .iter()
        .map(|(year, value)| BorderlineEntry {
            year: *year,
            value: value.to_string(),
        })
        .collect()
}

/// Look up the static criteria for a tournament type
pub fn criteria_for(tournament: TournamentType) -> QualificationCriteria {
    #[allow(clippy::type_complexity)]
    let (name, selection_period, total_slots, borderline_index, criteria, borderline_history): (
        &str,
        &str,
        usize,
        usize,
        SmallVec<[CriterionEntry; 6]>,
        Vec<BorderlineEntry>,
    ) = match tournament {
            TournamentType::Classic => (
                "Boat Race Classic",
                "Jan 1 - Dec 31 of the previous year",
                52,
                DEFAULT_BORDERLINE_INDEX,
                smallvec![
                    rule(1, "Previous winner (seed)", Fixed(1), "seed"),
                    rule(2, "Previous Grand Prix finalists (seed)", Fixed(6), "seed"),
                    rule(3, "Previous-year SG winners", Remaining, "SG wins"),
                    rule(4, "G1 / G2 winners", Remaining, "win count"),
                    rule(5, "Regional championship winners", Fixed(6), "regional wins"),
                    rule(6, "Most general-race wins", Remaining, "win count, then win rate"),
                ],
                history(&[
                    (2024, "general V5 / win rate 7.24"),
                    (2023, "general V4 / win rate 7.39"),
                    (2022, "general V6 / win rate 7.30"),
                    (2021, "general V5 / win rate 7.07"),
                ]),
            ),
            TournamentType::AllStar => (
                "Boat Race All Star",
                "Dec of the previous year - Feb (fan vote)",
                52,
                DEFAULT_BORDERLINE_INDEX,
                smallvec![
                    rule(1, "Previous winner (seed)", Fixed(1), "seed"),
                    rule(2, "Previous Grand Prix finalists (seed)", Fixed(6), "seed"),
                    rule(3, "Current-year Classic winner (seed)", Fixed(1), "seed"),
                    rule(4, "Top fan votes (A1 class)", Remaining, "fan vote order"),
                    rule(5, "Selection committee picks", Remaining, "recommendation"),
                ],
                history(&[
                    (2024, "fan vote #1: 22,497 votes"),
                    (2023, "fan vote #1: 23,071 votes"),
                    (2022, "fan vote #1: 26,575 votes"),
                    (2021, "fan vote #1: 34,968 votes"),
                ]),
            ),
            TournamentType::GrandChampion => (
                "Grand Champion",
                "Previous All Star - current Classic",
                52,
                DEFAULT_BORDERLINE_INDEX,
                smallvec![
                    rule(1, "Previous winner (seed)", Fixed(1), "seed"),
                    rule(2, "Previous Grand Prix finalists (seed)", Fixed(6), "seed"),
                    rule(3, "Current-year All Star winner (seed)", Fixed(1), "seed"),
                    rule(4, "SG final finishers", Remaining, "SG final count"),
                    rule(5, "Top qualifying-round points", Remaining, "points order"),
                ],
                history(&[
                    (2024, "90 points"),
                    (2023, "82 points"),
                    (2022, "77 points"),
                    (2021, "83 points"),
                ]),
            ),
            TournamentType::OceanCup => (
                "Ocean Cup",
                "May 1 of the previous year - Apr 30",
                52,
                DEFAULT_BORDERLINE_INDEX,
                smallvec![
                    rule(1, "Previous winner (seed)", Fixed(1), "seed"),
                    rule(2, "Previous Grand Prix finalists (seed)", Fixed(6), "seed"),
                    rule(3, "Current-year Grand Champion winner (seed)", Fixed(1), "seed"),
                    rule(4, "Top G2+ final placement points", Remaining, "placement points order"),
                ],
                history(&[
                    (2024, "20 points / placement points 632"),
                    (2023, "20 points / placement points 782"),
                    (2022, "20 points / placement points 490"),
                    (2021, "18 points / placement points 471"),
                ]),
            ),
            TournamentType::Memorial => (
                "Boat Race Memorial",
                "Rolling (venue recommendations)",
                52,
                DEFAULT_BORDERLINE_INDEX,
                smallvec![
                    rule(1, "Previous winner (seed)", Fixed(1), "seed"),
                    rule(2, "Previous Grand Prix finalists (seed)", Fixed(6), "seed"),
                    rule(3, "Current-year Ocean Cup winner (seed)", Fixed(1), "seed"),
                    rule(4, "Venue recommendations (23 venues x 2)", Fixed(46), "venue recommendation"),
                    rule(5, "Host venue recommendation", Remaining, "host recommendation"),
                ],
                history(&[
                    (2024, "2 recommended per venue"),
                    (2023, "2 recommended per venue"),
                ]),
            ),
            TournamentType::Derby => (
                "Boat Race Derby",
                "Aug 1 of the previous year - Jul 31",
                52,
                DEFAULT_BORDERLINE_INDEX,
                smallvec![
                    rule(1, "Previous winner (seed)", Fixed(1), "seed"),
                    rule(2, "Previous Grand Prix finalists (seed)", Fixed(6), "seed"),
                    rule(3, "Current-year Memorial winner (seed)", Fixed(1), "seed"),
                    rule(
                        4,
                        "Top period win rate (A1, 160+ starts)",
                        Remaining,
                        "win rate order"
                    ),
                ],
                history(&[
                    (2024, "win rate 7.50 (A1)"),
                    (2023, "win rate 7.45 (A1)"),
                    (2022, "win rate 7.42 (A1)"),
                ]),
            ),
            TournamentType::ChallengeCup => (
                "Challenge Cup",
                "Jan 1 - Oct 31",
                52,
                DEFAULT_BORDERLINE_INDEX,
                smallvec![
                    rule(1, "Previous Grand Prix finalists (seed)", Fixed(6), "seed"),
                    rule(2, "Current-year Derby winner (seed)", Fixed(1), "seed"),
                    rule(3, "Top prize money ranking", Remaining, "prize order"),
                ],
                history(&[
                    (2024, "around prize rank 60"),
                    (2023, "around prize rank 58"),
                ]),
            ),
            TournamentType::GrandPrix => (
                "Grand Prix",
                "Jan 1 - Dec 31",
                18,
                GRAND_PRIX_BORDERLINE_INDEX,
                smallvec![rule(1, "Prize money ranking 1-18", Fixed(18), "prize order")],
                history(&[(2024, "prize rank 18"), (2023, "prize rank 18")]),
            ),
        };

    QualificationCriteria {
        tournament,
        name: name.to_string(),
        selection_period: selection_period.to_string(),
        total_slots,
        borderline_index,
        criteria,
        borderline_history,
    }
}

/// Criteria for every tournament type, in calendar order
pub fn all_criteria() -> Vec<QualificationCriteria> {
    TournamentType::ALL.iter().map(|t| criteria_for(*t)).collect()
}
