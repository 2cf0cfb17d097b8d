//! Margin Selector
//!
//! Trims a ranked result list for display: every qualified racer plus the
//! next few racers past the cutoff.

use crate::types::QualificationResult;
use serde::Serialize;

/// Racers shown past the cutoff when no margin is given
pub const DEFAULT_MARGIN: usize = 10;

/// Display prefix: all qualified entries plus `margin` more
///
/// If every entry is qualified the full slice is returned. Otherwise, with
/// `i` the first non-qualified index, returns the first `min(i + margin, len)`
/// entries.
pub fn with_margin(results: &[QualificationResult], margin: usize) -> &[QualificationResult] {
    match results.iter().position(|r| !r.qualified) {
        None => results,
        Some(first_out) => {
            let end = first_out.saturating_add(margin).min(results.len());
            &results[..end]
        }
    }
}

/// Counts for a displayed prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginSummary {
    /// Qualified racers in the full result list
    pub qualified_count: usize,
    /// Shown but not qualified
    pub borderline_count: usize,
    pub total: usize,
}

impl MarginSummary {
    pub fn new(all: &[QualificationResult], shown: &[QualificationResult]) -> Self {
        let qualified_count = all.iter().filter(|r| r.qualified).count();
        Self {
            qualified_count,
            borderline_count: shown.len().saturating_sub(qualified_count),
            total: all.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qualification::fixtures::field;
    use crate::qualification::evaluate_with_criteria;
    use crate::criteria::criteria_for;
    use crate::types::TournamentType;

    /// `n` results with the first `qualified` marked qualified
    fn ranked(n: usize, qualified: usize) -> Vec<QualificationResult> {
        let mut criteria = criteria_for(TournamentType::GrandChampion);
        criteria.total_slots = qualified;
        evaluate_with_criteria(&field(n), &criteria)
    }

    #[test]
    fn test_margin_past_first_unqualified() {
        let results = ranked(30, 5);
        let shown = with_margin(&results, DEFAULT_MARGIN);

        assert_eq!(shown.len(), 15);
        assert_eq!(shown, &results[..15]);
    }

    #[test]
    fn test_margin_clamps_to_length() {
        let results = ranked(8, 5);
        assert_eq!(with_margin(&results, 10).len(), 8);
    }

    #[test]
    fn test_all_qualified_returned_unchanged() {
        let results = ranked(7, 52);
        assert_eq!(with_margin(&results, 10), results.as_slice());
    }

    #[test]
    fn test_empty_input() {
        assert!(with_margin(&[], 10).is_empty());
    }

    #[test]
    fn test_zero_margin_keeps_only_qualified() {
        let results = ranked(20, 4);
        let shown = with_margin(&results, 0);
        assert_eq!(shown.len(), 4);
        assert!(shown.iter().all(|r| r.qualified));
    }

    #[test]
    fn test_summary_counts() {
        let results = ranked(30, 5);
        let shown = with_margin(&results, 10);
        let summary = MarginSummary::new(&results, shown);

        assert_eq!(summary.qualified_count, 5);
        assert_eq!(summary.borderline_count, 10);
        assert_eq!(summary.total, 30);
    }
}
