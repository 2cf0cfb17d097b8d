//! GRAND_CHAMPION: SG qualifying-round points

use super::{borderline_record, build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

pub fn evaluate_grand_champion(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    let mut sorted: Vec<&PerformanceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.sg_points.cmp(&a.sg_points));

    let Some(borderline) = borderline_record(&sorted, criteria.borderline_index) else {
        return Vec::new();
    };
    let borderline_points = borderline.sg_points;

    sorted
        .iter()
        .enumerate()
        .map(|(index, racer)| {
            let qualified = index < criteria.total_slots;
            let distance = racer.sg_points as f64 - borderline_points as f64;

            let reason = if qualified {
                format!("SG points {} (finals {})", racer.sg_points, racer.sg_final_appearances)
            } else {
                format!("SG points {} (outside borderline)", racer.sg_points)
            };

            build_result(
                racer,
                TournamentType::GrandChampion,
                index,
                qualified,
                reason,
                distance,
                stats([
                    ("sgPoints", StatValue::from(racer.sg_points)),
                    ("sgFinalAppearances", StatValue::from(racer.sg_final_appearances)),
                    ("borderline", StatValue::from(format!("{} points", borderline_points))),
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
    fn test_sorted_by_sg_points() {
        let mut records = field(4);
        for (r, pts) in records.iter_mut().zip([40, 95, 62, 95]) {
            r.sg_points = pts;
            r.sg_final_appearances = 2;
        }
        let results = evaluate_grand_champion(&records, &criteria_for(TournamentType::GrandChampion));

        let ids: Vec<&str> = results.iter().map(|r| r.racer_id.as_str()).collect();
        // 1001 and 1003 tie on 95; input order is kept
        assert_eq!(ids, vec!["1001", "1003", "1002", "1000"]);
        assert_eq!(results[0].qualification_reason, "SG points 95 (finals 2)");
        // Borderline clamps to the last racer (40 points)
        assert_eq!(results[0].borderline_distance, 55.0);
        assert_eq!(results[3].borderline_distance, 0.0);
    }

    #[test]
    fn test_distance_against_52nd_racer() {
        let mut records = field(60);
        for (i, r) in records.iter_mut().enumerate() {
            r.sg_points = 100 - i as i64;
        }
        let results = evaluate_grand_champion(&records, &criteria_for(TournamentType::GrandChampion));

        // 52nd racer has 49 points
        assert_eq!(results[51].borderline_distance, 0.0);
        assert!(results[51].qualified);
        assert!(!results[52].qualified);
        assert_eq!(results[52].borderline_distance, -1.0);
        assert_eq!(results[52].qualification_reason, "SG points 48 (outside borderline)");
    }
}
