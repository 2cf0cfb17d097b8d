// Qualification Integration Tests
//
// Purpose: Public API end to end: JSON records in, ranked and trimmed results out
// Run with: cargo test --test qualification_tests

use approx::assert_relative_eq;
use serde_json::json;
use sg_qualifier::{
    apply_official_rankings, criteria_for, evaluate, evaluate_with_criteria, with_margin,
    MarginSummary, PerformanceRecord, RankingEntry, TournamentType, DEFAULT_MARGIN,
};

fn records_from_json(value: serde_json::Value) -> Vec<PerformanceRecord> {
    serde_json::from_value(value).expect("Failed to parse records")
}

#[test]
fn test_classic_three_racer_example() {
    let records = records_from_json(json!([
        { "racerId": "9001", "name": "Alpha", "rank": "A1", "generalWins": 5, "winRate": 7.0 },
        { "racerId": "9002", "name": "Bravo", "rank": "A1", "generalWins": 3, "winRate": 8.0 },
        { "racerId": "9003", "name": "Charlie", "rank": "A2", "generalWins": 5, "winRate": 7.5 },
    ]));

    let mut criteria = criteria_for(TournamentType::Classic);
    criteria.total_slots = 2;
    criteria.borderline_index = 1;

    let results = evaluate_with_criteria(&records, &criteria);
    let order: Vec<&str> = results.iter().map(|r| r.racer_id.as_str()).collect();
    assert_eq!(order, vec!["9003", "9001", "9002"]);

    assert!(results[0].qualified);
    assert!(results[1].qualified);
    assert!(!results[2].qualified);

    // (3 - 5) * 10 + (8.0 - 7.0)
    assert_relative_eq!(results[2].borderline_distance, -19.0);
    assert!(results[2].qualification_reason.contains("outside borderline"));
}

#[test]
fn test_derby_eligibility() {
    let records = records_from_json(json!([
        { "racerId": "9001", "name": "Alpha", "rank": "A1", "periodWinRate": 7.9, "raceAppearances": 200 },
        { "racerId": "9002", "name": "Bravo", "rank": "A1", "periodWinRate": 8.4, "raceAppearances": 159 },
        { "racerId": "9003", "name": "Charlie", "rank": "A2", "periodWinRate": 8.8, "raceAppearances": 210 },
        { "racerId": "9004", "name": "Delta", "rank": "A1", "periodWinRate": 6.1, "raceAppearances": 160 },
        { "racerId": "9005", "name": "Echo", "rank": "A1", "periodWinRate": 9.0 },
    ]));

    let results = evaluate(&records, TournamentType::Derby);
    let ids: Vec<&str> = results.iter().map(|r| r.racer_id.as_str()).collect();
    assert_eq!(ids, vec!["9001", "9004"]);
    assert!(results.iter().all(|r| r.qualified));
}

#[test]
fn test_grand_prix_overlay_and_margin() {
    let mut records: Vec<PerformanceRecord> = records_from_json(json!(
        (0..40)
            .map(|i| json!({
                "racerId": format!("{}", 5000 + i),
                "name": format!("Synthetic {}", i),
                "rank": "A1",
                "totalPrizeMoney": 1_000 + i,
            }))
            .collect::<Vec<_>>()
    ));

    // Official ranking puts the lowest estimate first
    let prize = vec![RankingEntry {
        rank: 1,
        racer_id: "5000".to_string(),
        name: String::new(),
        value: 50_000,
    }];
    assert_eq!(apply_official_rankings(&mut records, &prize, &[]), 1);

    let results = evaluate(&records, TournamentType::GrandPrix);
    assert_eq!(results[0].racer_id, "5000");
    assert_eq!(results.iter().filter(|r| r.qualified).count(), 18);

    let shown = with_margin(&results, DEFAULT_MARGIN);
    assert_eq!(shown.len(), 28);

    let summary = MarginSummary::new(&results, shown);
    assert_eq!(summary.qualified_count, 18);
    assert_eq!(summary.borderline_count, 10);
    assert_eq!(summary.total, 40);
}

#[test]
fn test_results_serialize_camel_case() {
    let records = records_from_json(json!([
        { "racerId": "9001", "name": "Alpha", "rank": "A1", "sgPoints": 12, "sgFinalAppearances": 2 },
    ]));

    let results = evaluate(&records, TournamentType::GrandChampion);
    let value = serde_json::to_value(&results[0]).unwrap();

    assert_eq!(value["racerId"], "9001");
    assert_eq!(value["sgType"], "GRAND_CHAMPION");
    assert_eq!(value["rank"], 1);
    assert_eq!(value["qualified"], true);
    assert_eq!(value["stats"]["sgPoints"], 12);
    assert!(value["qualificationReason"].as_str().unwrap().contains("12"));
}
