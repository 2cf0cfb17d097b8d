//! OCEAN_CUP: G2-and-above placement points
//!
//! Sort: `g2_plus_points` desc, ties by `g2_plus_final_points` desc.
//! The distance only uses the primary points.

use super::{borderline_record, build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

pub fn evaluate_ocean_cup(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    let mut sorted: Vec<&PerformanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.g2_plus_points
            .cmp(&a.g2_plus_points)
            .then_with(|| b.g2_plus_final_points.cmp(&a.g2_plus_final_points))
    });

    let Some(borderline) = borderline_record(&sorted, criteria.borderline_index) else {
        return Vec::new();
    };

    sorted
        .iter()
        .enumerate()
        .map(|(index, racer)| {
            let qualified = index < criteria.total_slots;
            let distance = racer.g2_plus_points as f64 - borderline.g2_plus_points as f64;

            let reason = if qualified {
                format!(
                    "G2+ points {} / all points {}",
                    racer.g2_plus_points, racer.g2_plus_final_points
                )
            } else {
                format!("placement points {} (outside borderline)", racer.g2_plus_points)
            };

            build_result(
                racer,
                TournamentType::OceanCup,
                index,
                qualified,
                reason,
                distance,
                stats([
                    ("g2PlusPoints", StatValue::from(racer.g2_plus_points)),
                    ("g2PlusFinalPoints", StatValue::from(racer.g2_plus_final_points)),
                    (
                        "borderline",
                        StatValue::from(format!("{} points", borderline.g2_plus_points)),
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
    fn test_final_points_break_ties() {
        let mut records = field(3);
        records[0].g2_plus_points = 20;
        records[0].g2_plus_final_points = 490;
        records[1].g2_plus_points = 20;
        records[1].g2_plus_final_points = 632;
        records[2].g2_plus_points = 18;
        records[2].g2_plus_final_points = 900;

        let results = evaluate_ocean_cup(&records, &criteria_for(TournamentType::OceanCup));
        let ids: Vec<&str> = results.iter().map(|r| r.racer_id.as_str()).collect();
        assert_eq!(ids, vec!["1001", "1000", "1002"]);

        // Distance ignores the tie-break points
        assert_eq!(results[0].borderline_distance, 2.0);
        assert_eq!(results[1].borderline_distance, 2.0);
        assert_eq!(results[0].qualification_reason, "G2+ points 20 / all points 632");
    }
}
