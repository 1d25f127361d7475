//! Elimination planner
//!
//! Computes who falls outside a stage's advancement quota. The result is a
//! preview: nothing is mutated until the admin confirms it, and confirmation
//! must present the plan's fingerprint so a ranking that moved in between is
//! detected instead of acted on.

use std::collections::BTreeSet;

use serde::Serialize;
use uuid::Uuid;

use super::ranking::RankedEntry;
use crate::utils::crypto::hash_string;

/// Non-mutating elimination preview for one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EliminationPlan {
    pub stage_id: Uuid,
    pub quota: usize,
    /// Participants with a completed result
    pub ranked_count: usize,
    /// Participants listed after the first `quota` places, in ranking order
    pub candidates: Vec<Uuid>,
    /// Everyone sharing the position the cut falls into, when the cut splits a tie
    pub tied_at_cut: Vec<Uuid>,
    /// Approved participants with no completed result; never candidates
    pub missing_results: Vec<Uuid>,
    /// SHA-256 over the quota and the full ranking the plan was derived from
    pub fingerprint: String,
}

impl EliminationPlan {
    pub fn action_needed(&self) -> bool {
        !self.candidates.is_empty()
    }

    pub fn has_tie_at_cut(&self) -> bool {
        !self.tied_at_cut.is_empty()
    }

    /// Whether a confirmation lists exactly this plan's candidates, each once
    pub fn matches(&self, participants: &[Uuid], fingerprint: &str) -> bool {
        if self.fingerprint != fingerprint || participants.len() != self.candidates.len() {
            return false;
        }

        let confirmed: BTreeSet<&Uuid> = participants.iter().collect();
        let planned: BTreeSet<&Uuid> = self.candidates.iter().collect();
        confirmed == planned
    }
}

/// Plan the eliminations for a stage from its current ranking.
///
/// When the pool is no larger than the quota the plan is empty. A tie
/// group straddling the cut is not resolved here: the ranking order decides
/// the list and the whole group is reported in `tied_at_cut`.
pub fn plan_eliminations(
    stage_id: Uuid,
    quota: usize,
    ranking: &[RankedEntry],
    missing_results: Vec<Uuid>,
) -> EliminationPlan {
    let fingerprint = ranking_fingerprint(quota, ranking);

    let (candidates, tied_at_cut) = if quota > 0 && ranking.len() > quota {
        let candidates = ranking[quota..]
            .iter()
            .map(|entry| entry.participant_id)
            .collect();

        let last_advancing = ranking[quota - 1].position;
        let tied_at_cut = if ranking[quota].position == last_advancing {
            ranking
                .iter()
                .filter(|entry| entry.position == last_advancing)
                .map(|entry| entry.participant_id)
                .collect()
        } else {
            Vec::new()
        };

        (candidates, tied_at_cut)
    } else {
        (Vec::new(), Vec::new())
    };

    EliminationPlan {
        stage_id,
        quota,
        ranked_count: ranking.len(),
        candidates,
        tied_at_cut,
        missing_results,
        fingerprint,
    }
}

/// Stable digest of a ranking as seen by the planner
pub fn ranking_fingerprint(quota: usize, ranking: &[RankedEntry]) -> String {
    let mut canonical = format!("quota={}", quota);
    for entry in ranking {
        canonical.push_str(&format!(
            ";{}:{}:{}",
            entry.participant_id, entry.position, entry.elapsed_seconds
        ));
    }
    hash_string(&canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(participant: u128, position: i32, elapsed_seconds: i32) -> RankedEntry {
        RankedEntry {
            participant_id: Uuid::from_u128(participant),
            position,
            elapsed_seconds,
        }
    }

    fn ids(values: &[u128]) -> Vec<Uuid> {
        values.iter().map(|v| Uuid::from_u128(*v)).collect()
    }

    #[test]
    fn test_round_one_cut() {
        // A=45s, B=50s, C=50s, D=60s with quota 2
        let ranking = vec![entry(1, 1, 45), entry(2, 2, 50), entry(3, 2, 50), entry(4, 4, 60)];
        let plan = plan_eliminations(Uuid::nil(), 2, &ranking, Vec::new());

        assert!(plan.action_needed());
        assert_eq!(plan.candidates, ids(&[3, 4]));
        assert_eq!(plan.tied_at_cut, ids(&[2, 3]));
        assert_eq!(plan.ranked_count, 4);
    }

    #[test]
    fn test_pool_equal_to_quota_needs_no_action() {
        let ranking = vec![entry(1, 1, 45), entry(2, 2, 50)];
        let plan = plan_eliminations(Uuid::nil(), 2, &ranking, Vec::new());

        assert!(!plan.action_needed());
        assert!(plan.candidates.is_empty());
        assert!(!plan.has_tie_at_cut());
    }

    #[test]
    fn test_three_way_tie_across_cut_is_reported_whole() {
        let ranking = vec![entry(1, 1, 40), entry(2, 2, 50), entry(3, 2, 50), entry(4, 2, 50)];
        let plan = plan_eliminations(Uuid::nil(), 2, &ranking, Vec::new());

        assert_eq!(plan.tied_at_cut, ids(&[2, 3, 4]));
        assert_eq!(plan.candidates, ids(&[3, 4]));
        assert!(plan.tied_at_cut.iter().all(|id| *id != Uuid::from_u128(1)));
    }

    #[test]
    fn test_clean_cut_reports_no_tie() {
        let ranking = vec![entry(1, 1, 40), entry(2, 2, 45), entry(3, 3, 50), entry(4, 3, 50)];
        let plan = plan_eliminations(Uuid::nil(), 2, &ranking, Vec::new());

        assert_eq!(plan.candidates, ids(&[3, 4]));
        assert!(!plan.has_tie_at_cut());
    }

    #[test]
    fn test_missing_results_are_not_candidates() {
        let ranking = vec![entry(1, 1, 40)];
        let plan = plan_eliminations(Uuid::nil(), 1, &ranking, ids(&[7]));

        assert!(plan.candidates.is_empty());
        assert_eq!(plan.missing_results, ids(&[7]));
    }

    #[test]
    fn test_fingerprint_tracks_ranking_changes() {
        let ranking = vec![entry(1, 1, 45), entry(2, 2, 50), entry(3, 3, 55)];
        let corrected = vec![entry(1, 1, 45), entry(3, 2, 48), entry(2, 3, 50)];

        let original = ranking_fingerprint(2, &ranking);
        assert_eq!(original, ranking_fingerprint(2, &ranking));
        assert_ne!(original, ranking_fingerprint(2, &corrected));
        assert_ne!(original, ranking_fingerprint(1, &ranking));
        assert_eq!(original.len(), 64);
    }

    #[test]
    fn test_matches_ignores_order_but_not_membership() {
        let ranking = vec![entry(1, 1, 45), entry(2, 2, 50), entry(3, 3, 55), entry(4, 4, 60)];
        let plan = plan_eliminations(Uuid::nil(), 2, &ranking, Vec::new());

        assert!(plan.matches(&ids(&[4, 3]), &plan.fingerprint));
        assert!(!plan.matches(&ids(&[4]), &plan.fingerprint));
        assert!(!plan.matches(&ids(&[2, 3, 4]), &plan.fingerprint));
        assert!(!plan.matches(&ids(&[3, 4]), "stale"));
    }

    #[test]
    fn test_matches_rejects_repeated_ids() {
        let ranking = vec![entry(1, 1, 45), entry(2, 2, 50), entry(3, 3, 55), entry(4, 4, 60)];
        let plan = plan_eliminations(Uuid::nil(), 2, &ranking, Vec::new());

        assert!(!plan.matches(&ids(&[3, 3, 4]), &plan.fingerprint));
        assert!(!plan.matches(&ids(&[3, 4, 4]), &plan.fingerprint));
        assert!(plan.matches(&ids(&[3, 4]), &plan.fingerprint));
    }
}
