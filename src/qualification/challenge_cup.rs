//! CHALLENGE_CUP: prize money ranking

use super::{borderline_record, build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

/// Stable descending sort on total prize money (shared with the Grand Prix)
pub(crate) fn sort_by_prize(records: &[PerformanceRecord]) -> Vec<&PerformanceRecord> {
    let mut sorted: Vec<&PerformanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.total_prize_money.cmp(&a.total_prize_money));
    sorted
}

pub fn evaluate_challenge_cup(
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
            let qualified = index < criteria.total_slots;
            let prize_rank = index + 1;
            let distance = racer.total_prize_money as f64 - borderline.total_prize_money as f64;

            let reason = if qualified {
                format!("prize rank {} (amount {})", prize_rank, racer.total_prize_money)
            } else {
                format!("prize rank {} (outside borderline)", prize_rank)
            };

            build_result(
                racer,
                TournamentType::ChallengeCup,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::criteria_for;
    use crate::qualification::fixtures::field;

    #[test]
    fn test_prize_order_and_borderline() {
        let mut records = field(60);
        for (i, r) in records.iter_mut().enumerate() {
            r.total_prize_money = 1_000 + i as i64 * 10;
        }
        let results = evaluate_challenge_cup(&records, &criteria_for(TournamentType::ChallengeCup));

        assert_eq!(results[0].racer_id, "1059");
        assert_eq!(results[0].qualification_reason, "prize rank 1 (amount 1590)");
        assert_eq!(results[51].borderline_distance, 0.0);
        assert!(results[51].qualified);
        assert!(!results[52].qualified);
        assert_eq!(results[52].qualification_reason, "prize rank 53 (outside borderline)");
        assert_eq!(results[52].borderline_distance, -10.0);
        assert_eq!(results[0].stats["prizeRanking"], StatValue::Int(1));
    }

    #[test]
    fn test_negative_and_max_prize_money() {
        let mut records = field(2);
        records[0].total_prize_money = -1;
        records[1].total_prize_money = i64::MAX;

        let results = evaluate_challenge_cup(&records, &criteria_for(TournamentType::ChallengeCup));
        assert_eq!(results[0].racer_id, "1001");
        assert!(results[0].borderline_distance > 9.2e18);
        assert!(results[0].borderline_distance.is_finite());
        assert_eq!(results[1].qualification_reason, "prize rank 2 (amount -1)");
    }
}
