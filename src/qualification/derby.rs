//! DERBY: selection-period win rate among A1 racers with 160+ starts
//!
//! Racers below A1 or under the appearance floor are dropped before ranking.
//! A missing period win rate counts as zero.

use super::{borderline_record, build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

/// Minimum race appearances in the selection period
pub const DERBY_MIN_APPEARANCES: u32 = 160;

fn is_eligible(racer: &PerformanceRecord) -> bool {
    racer.class_rank.is_top_tier() && racer.race_appearances_or_zero() >= DERBY_MIN_APPEARANCES
}

pub fn evaluate_derby(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    let mut sorted: Vec<&PerformanceRecord> = records.iter().filter(|r| is_eligible(r)).collect();
    sorted.sort_by(|a, b| b.period_win_rate_or_zero().total_cmp(&a.period_win_rate_or_zero()));

    let Some(borderline) = borderline_record(&sorted, criteria.borderline_index) else {
        return Vec::new();
    };
    let borderline_rate = borderline.period_win_rate_or_zero();

    sorted
        .iter()
        .enumerate()
        .map(|(index, racer)| {
            let qualified = index < criteria.total_slots;
            let rate = racer.period_win_rate_or_zero();
            let distance = rate - borderline_rate;

            let reason = if qualified {
                format!(
                    "win rate {:.2} (top tier, ≥{} starts)",
                    rate, DERBY_MIN_APPEARANCES
                )
            } else {
                format!("win rate {:.2} (outside borderline)", rate)
            };

            build_result(
                racer,
                TournamentType::Derby,
                index,
                qualified,
                reason,
                distance,
                stats([
                    ("periodWinRate", StatValue::from(rate)),
                    ("raceAppearances", StatValue::from(racer.race_appearances_or_zero())),
                    ("rank", StatValue::from(racer.class_rank.as_str())),
                    ("borderline", StatValue::from(format!("{:.2}", borderline_rate))),
                ]),
            )
        })
        .collect()
}
