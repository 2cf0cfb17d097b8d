//! MEMORIAL: venue recommendations
//!
//! Entrants are picked by each venue, which no statistic captures. Win rate
//! order stands in as the recommendation proxy; there is no borderline and
//! the distance is always zero.

use super::{build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

pub fn evaluate_memorial(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    let mut sorted: Vec<&PerformanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));

    sorted
        .iter()
        .enumerate()
        .map(|(index, racer)| {
            let qualified = index < criteria.total_slots;
            let reason = if qualified {
                "venue recommendation (assumed)"
            } else {
                "outside recommendation slots (assumed)"
            };

            build_result(
                racer,
                TournamentType::Memorial,
                index,
                qualified,
                reason.to_string(),
                0.0,
                stats([
                    ("winRate", StatValue::from(racer.win_rate)),
                    ("sgWins", StatValue::from(racer.sg_wins)),
                    ("totalPrizeMoney", StatValue::from(racer.total_prize_money)),
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
    use crate::types::ClassRank;

    #[test]
    fn test_win_rate_proxy_without_filter() {
        let mut records = field(55);
        for (i, r) in records.iter_mut().enumerate() {
            r.win_rate = i as f64 * 0.1;
            if i % 2 == 0 {
                r.class_rank = ClassRank::B2;
            }
        }
        let results = evaluate_memorial(&records, &criteria_for(TournamentType::Memorial));

        assert_eq!(results.len(), 55);
        assert_eq!(results[0].racer_id, "1054");
        assert_eq!(results.iter().filter(|r| r.qualified).count(), 52);
        assert!(results.iter().all(|r| r.borderline_distance == 0.0));
        assert_eq!(results[0].qualification_reason, "venue recommendation (assumed)");
        assert_eq!(results[54].qualification_reason, "outside recommendation slots (assumed)");
    }
}
