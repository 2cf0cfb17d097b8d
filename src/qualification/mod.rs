//! Qualification rule modules for SG selection
//!
//! Each tournament type is implemented in its own module. Every rule follows
//! the same shape:
//!   1. optional pre-filter (class rank, appearance floor)
//!   2. stable descending sort on the tournament's metric
//!   3. borderline reference at `min(borderline_index, len - 1)`
//!   4. `qualified` = sorted index < slot cutoff
//!   5. borderline distance = racer metric - borderline metric
//!   6. rank = sorted position, 1-based
//!
//! Equal metrics keep their input order (`sort_by` is stable).

pub mod all_star;
pub mod challenge_cup;
pub mod classic;
pub mod derby;
pub mod grand_champion;
pub mod grand_prix;
pub mod memorial;
pub mod ocean_cup;

pub use all_star::evaluate_all_star;
pub use challenge_cup::evaluate_challenge_cup;
pub use classic::evaluate_classic;
pub use derby::{evaluate_derby, DERBY_MIN_APPEARANCES};
pub use grand_champion::evaluate_grand_champion;
pub use grand_prix::{evaluate_grand_prix, GRAND_PRIX_SLOTS};
pub use memorial::evaluate_memorial;
pub use ocean_cup::evaluate_ocean_cup;

use crate::criteria::{criteria_for, QualificationCriteria};
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Rank and label racers for one tournament using the static criteria table
pub fn evaluate(records: &[PerformanceRecord], tournament: TournamentType) -> Vec<QualificationResult> {
    evaluate_with_criteria(records, &criteria_for(tournament))
}

/// Rank and label racers against caller-supplied criteria
///
/// The rule is chosen by `criteria.tournament`; `total_slots` and
/// `borderline_index` are read from the given criteria.
pub fn evaluate_with_criteria(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    match criteria.tournament {
        TournamentType::Classic => evaluate_classic(records, criteria),
        TournamentType::AllStar => evaluate_all_star(records, criteria),
        TournamentType::GrandChampion => evaluate_grand_champion(records, criteria),
        TournamentType::OceanCup => evaluate_ocean_cup(records, criteria),
        TournamentType::Memorial => evaluate_memorial(records, criteria),
        TournamentType::Derby => evaluate_derby(records, criteria),
        TournamentType::ChallengeCup => evaluate_challenge_cup(records, criteria),
        TournamentType::GrandPrix => evaluate_grand_prix(records, criteria),
    }
}

/// Evaluate every tournament type in parallel (Rayon)
///
/// Output order follows `TournamentType::ALL`.
pub fn evaluate_all(records: &[PerformanceRecord]) -> Vec<(TournamentType, Vec<QualificationResult>)> {
    TournamentType::ALL
        .par_iter()
        .map(|t| (*t, evaluate(records, *t)))
        .collect()
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Borderline reference record, clamped to the last entry for short lists
///
/// With fewer racers than `index + 1` the reference is simply the last racer,
/// which makes the distance meaningless for tiny inputs.
pub(crate) fn borderline_record<'a>(
    sorted: &[&'a PerformanceRecord],
    index: usize,
) -> Option<&'a PerformanceRecord> {
    let last = sorted.len().checked_sub(1)?;
    Some(sorted[index.min(last)])
}

pub(crate) fn stats<const N: usize>(entries: [(&str, StatValue); N]) -> BTreeMap<String, StatValue> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub(crate) fn build_result(
    racer: &PerformanceRecord,
    tournament: TournamentType,
    position: usize,
    qualified: bool,
    qualification_reason: String,
    borderline_distance: f64,
    stats: BTreeMap<String, StatValue>,
) -> QualificationResult {
    QualificationResult {
        racer_id: racer.racer_id.clone(),
        racer: racer.clone(),
        tournament,
        qualified,
        qualification_reason,
        rank: position + 1,
        borderline_distance,
        stats,
    }
}

// ============================================================================
// Test fixtures
// ============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::types::{ClassRank, PerformanceRecord};

    /// Synthetic racer with every statistic at zero
    pub fn racer(id: &str, class_rank: ClassRank) -> PerformanceRecord {
        PerformanceRecord::new(id, format!("Synthetic {}", id), class_rank)
    }

    /// `n` A1 racers with ids "1000".."1000+n", all statistics zero
    pub fn field(n: usize) -> Vec<PerformanceRecord> {
        (0..n)
            .map(|i| racer(&format!("{}", 1000 + i), ClassRank::A1))
            .collect()
    }
}
