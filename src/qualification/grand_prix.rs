//! GRAND_PRIX: top 18 of the prize money ranking
//!
//! The cutoff is always 18 regardless of `total_slots`. Racers below it are
//! the Grand Prix series field.

use super::challenge_cup::sort_by_prize;
use super::{borderline_record, build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

/// Fixed Grand Prix field size
pub const GRAND_PRIX_SLOTS: usize = 18;

pub fn evaluate_grand_prix(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    let sorted = sort_by_prize(records);

    let Some(borderline) = borderline_record(&sorted, criteria.borderline_index) else {
        return Vec::new();
    };

    sorted
        .iter()
        .enumerate()
        .map(|(index, racer)| {
            let qualified = index < GRAND_PRIX_SLOTS;
            let prize_rank = index + 1;
            let distance = racer.total_prize_money as f64 - borderline.total_prize_money as f64;

            let reason = if qualified {
                format!("prize rank {} (amount {})", prize_rank, racer.total_prize_money)
            } else {
                format!("prize rank {} (Grand Prix series range)", prize_rank)
            };

            build_result(
                racer,
                TournamentType::GrandPrix,
                index,
                qualified,
                reason,
                distance,
                stats([
                    ("prizeRanking", StatValue::from(prize_rank)),
                    ("totalPrizeMoney", StatValue::from(racer.total_prize_money)),
                    (
                        "borderline",
                        StatValue::from(format!("{}", borderline.total_prize_money)),
                    ),
                ]),
            )
        })
        .collect()
}
