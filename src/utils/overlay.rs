//! Official Ranking Overlay
//!
//! Scraped performance records carry estimated prize money and fan votes.
//! When the official prize-money or fan-vote rankings are available their
//! values replace the estimates, matched by racer id.

use crate::types::PerformanceRecord;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One row of an official ranking
///
/// `value` is prize money (10,000 yen units) for the prize ranking and the
/// vote count for the fan-vote ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub rank: u32,
    pub racer_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(alias = "prizeMoney", alias = "votes")]
    pub value: i64,
}

fn index_by_racer(entries: &[RankingEntry]) -> FxHashMap<&str, &RankingEntry> {
    entries.iter().map(|e| (e.racer_id.as_str(), e)).collect()
}

/// Overwrite prize money / fan votes with official ranking values
///
/// Returns the number of records touched by either ranking. Racers absent
/// from a ranking keep their existing values.
pub fn apply_official_rankings(
    records: &mut [PerformanceRecord],
    prize_ranking: &[RankingEntry],
    fan_vote_ranking: &[RankingEntry],
) -> usize {
    let prize = index_by_racer(prize_ranking);
    let votes = index_by_racer(fan_vote_ranking);

    let mut touched = 0;
    for record in records.iter_mut() {
        let mut hit = false;

        if let Some(entry) = prize.get(record.racer_id.as_str()) {
            record.total_prize_money = entry.value;
            record.prize_ranking = Some(entry.rank);
            hit = true;
        }

        if let Some(entry) = votes.get(record.racer_id.as_str()) {
            record.fan_votes = Some(u64::try_from(entry.value).unwrap_or(0));
            record.fan_vote_rank = Some(entry.rank);
            hit = true;
        }

        if hit {
            touched += 1;
        }
    }
    touched
}
