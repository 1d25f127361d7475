//! Champion standings
//!
//! Turns the terminal stage ranking into final season positions. Positions
//! must come out unique and contiguous, so a ranking that still contains a
//! tie cannot be finalized.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::ranking::{RankedEntry, has_ties};
use crate::error::{AppError, AppResult};

/// A participant's final season standing, ready to be persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub participant_id: Uuid,
    pub final_position: i32,
    pub final_points: i64,
}

/// Build one standing per ranked participant, in position order.
///
/// `points` holds each participant's cumulative season points; anyone
/// missing from it is finalized with zero.
pub fn build_standings(
    ranking: &[RankedEntry],
    points: &HashMap<Uuid, i64>,
) -> AppResult<Vec<Standing>> {
    if ranking.is_empty() {
        return Err(AppError::NotEligible(
            "Terminal stage has no completed results to finalize".to_string(),
        ));
    }

    if has_ties(ranking) {
        return Err(AppError::Conflict(
            "Terminal stage ranking contains a tie; correct the results before finalizing"
                .to_string(),
        ));
    }

    Ok(ranking
        .iter()
        .map(|entry| Standing {
            participant_id: entry.participant_id,
            final_position: entry.position,
            final_points: points.get(&entry.participant_id).copied().unwrap_or(0),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(participant: u128, position: i32) -> RankedEntry {
        RankedEntry {
            participant_id: Uuid::from_u128(participant),
            position,
            elapsed_seconds: 30 + position,
        }
    }

    #[test]
    fn test_standings_mirror_positions_and_points() {
        let ranking = vec![entry(1, 1), entry(2, 2), entry(3, 3)];
        let points = HashMap::from([
            (Uuid::from_u128(1), 30),
            (Uuid::from_u128(2), 25),
        ]);

        let standings = build_standings(&ranking, &points).unwrap();

        assert_eq!(standings.len(), 3);
        assert_eq!(standings[0].final_position, 1);
        assert_eq!(standings[0].final_points, 30);
        assert_eq!(standings[1].final_points, 25);
        assert_eq!(standings[2].participant_id, Uuid::from_u128(3));
        assert_eq!(standings[2].final_points, 0);
    }

    #[test]
    fn test_empty_ranking_is_rejected() {
        let err = build_standings(&[], &HashMap::new()).unwrap_err();
        assert_eq!(err.error_code(), "NOT_ELIGIBLE");
    }

    #[test]
    fn test_tied_ranking_is_rejected() {
        let ranking = vec![entry(1, 1), entry(2, 2), entry(3, 2)];
        let err = build_standings(&ranking, &HashMap::new()).unwrap_err();
        assert_eq!(err.error_code(), "CONFLICT");
    }
}
