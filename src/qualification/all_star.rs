//! ALL_STAR: fan vote order among A1 racers
//!
//! Non-A1 racers are dropped before ranking. Missing votes count as zero.

use super::{borderline_record, build_result, stats};
use crate::criteria::QualificationCriteria;
use crate::types::{PerformanceRecord, QualificationResult, StatValue, TournamentType};

pub fn evaluate_all_star(
    records: &[PerformanceRecord],
    criteria: &QualificationCriteria,
) -> Vec<QualificationResult> {
    let mut sorted: Vec<&PerformanceRecord> = records
        .iter()
        .filter(|r| r.class_rank.is_top_tier())
        .collect();
    sorted.sort_by(|a, b| b.fan_votes_or_zero().cmp(&a.fan_votes_or_zero()));

    let Some(borderline) = borderline_record(&sorted, criteria.borderline_index) else {
        return Vec::new();
    };
    let borderline_votes = borderline.fan_votes_or_zero();

    sorted
        .iter()
        .enumerate()
        .map(|(index, racer)| {
            let qualified = index < criteria.total_slots;
            let votes = racer.fan_votes_or_zero();
            let vote_rank = index + 1;
            let distance = votes as f64 - borderline_votes as f64;

            let reason = if qualified {
                format!("fan vote rank {} (votes {})", vote_rank, votes)
            } else {
                format!("fan vote rank {} (outside borderline)", vote_rank)
            };

            build_result(
                racer,
                TournamentType::AllStar,
                index,
                qualified,
                reason,
                distance,
                stats([
                    ("fanVotes", StatValue::from(votes)),
                    ("fanVoteRank", StatValue::from(vote_rank)),
                    ("rank", StatValue::from(racer.class_rank.as_str())),
                    ("borderline", StatValue::from(format!("{} votes", borderline_votes))),
                ]),
            )
        })
        .collect()
}
