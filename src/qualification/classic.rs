//! CLASSIC: general-race wins, then win rate
//!
//! Sort: `general_wins` desc, ties by `win_rate` desc.
//! Borderline distance weights one win as ten points of win rate:
//! `(wins - borderline_wins) * 10 + (rate - borderline_rate)`.

use super::{borderline_record, build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

/// Win count weight relative to win rate in the borderline distance
pub const WIN_WEIGHT: f64 = 10.0;

pub fn evaluate_classic(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    let mut sorted: Vec<&PerformanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.general_wins
            .cmp(&a.general_wins)
            .then_with(|| b.win_rate.total_cmp(&a.win_rate))
    });

    let Some(borderline) = borderline_record(&sorted, criteria.borderline_index) else {
        return Vec::new();
    };

    sorted
        .iter()
        .enumerate()
        .map(|(index, racer)| {
            let qualified = index < criteria.total_slots;
            let distance = (f64::from(racer.general_wins) - f64::from(borderline.general_wins))
                * WIN_WEIGHT
                + (racer.win_rate - borderline.win_rate);

            let reason = if qualified {
                format!("general wins {} / win rate {:.2}", racer.general_wins, racer.win_rate)
            } else {
                format!(
                    "outside borderline (general wins {} / win rate {:.2})",
                    racer.general_wins, racer.win_rate
                )
            };

            build_result(
                racer,
                TournamentType::Classic,
                index,
                qualified,
                reason,
                distance,
                stats([
                    ("generalWins", StatValue::from(racer.general_wins)),
                    ("winRate", StatValue::from(racer.win_rate)),
                    (
                        "borderline",
                        StatValue::from(format!(
                            "V{} / {:.2}",
                            borderline.general_wins, borderline.win_rate
                        )),
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
    use crate::qualification::fixtures::racer;
    use crate::types::ClassRank;
    use approx::assert_relative_eq;

    fn candidate(id: &str, wins: u32, rate: f64) -> PerformanceRecord {
        let mut r = racer(id, ClassRank::A1);
        r.general_wins = wins;
        r.win_rate = rate;
        r
    }

    #[test]
    fn test_wins_then_rate_ordering() {
        let records = vec![
            candidate("idx0", 5, 7.0),
            candidate("idx1", 3, 8.0),
            candidate("idx2", 5, 7.5),
        ];
        let mut criteria = criteria_for(TournamentType::Classic);
        criteria.total_slots = 2;
        criteria.borderline_index = 1;

        let results = evaluate_classic(&records, &criteria);
        let order: Vec<&str> = results.iter().map(|r| r.racer_id.as_str()).collect();
        assert_eq!(order, vec!["idx2", "idx0", "idx1"]);

        assert!(results[0].qualified);
        assert!(results[1].qualified);
        assert!(!results[2].qualified);

        // Borderline is idx0 (V5 / 7.00): idx1 = (3-5)*10 + (8.0-7.0) = -19
        assert_relative_eq!(results[2].borderline_distance, -19.0, epsilon = 1e-9);
        assert_relative_eq!(results[0].borderline_distance, 0.5, epsilon = 1e-9);
        assert_eq!(results[2].qualification_reason, "outside borderline (general wins 3 / win rate 8.00)");
        assert_eq!(results[0].qualification_reason, "general wins 5 / win rate 7.50");
    }

    #[test]
    fn test_default_borderline_clamps_for_small_field() {
        let records = vec![
            candidate("idx0", 5, 7.0),
            candidate("idx1", 3, 8.0),
            candidate("idx2", 5, 7.5),
        ];
        let results = evaluate_classic(&records, &criteria_for(TournamentType::Classic));

        // Index 51 clamps to the last racer, who is its own borderline
        assert_relative_eq!(results[2].borderline_distance, 0.0, epsilon = 1e-9);
        assert!(results.iter().all(|r| r.qualified));
        assert_eq!(results[0].stats["borderline"], StatValue::from("V3 / 8.00"));
    }

    #[test]
    fn test_equal_records_keep_input_order() {
        let records = vec![
            candidate("a", 4, 7.1),
            candidate("b", 4, 7.1),
            candidate("c", 4, 7.1),
        ];
        let results = evaluate_classic(&records, &criteria_for(TournamentType::Classic));
        let order: Vec<&str> = results.iter().map(|r| r.racer_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }
}
