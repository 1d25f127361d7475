//! Ranking engine
//!
//! Orders completed results by elapsed time (fastest first) using standard
//! competition ranking: equal times share a position and the next position
//! skips the tied count, e.g. `1, 2, 2, 4`.

use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

use crate::models::PerformanceRecord;

/// One participant's place in a stage ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub participant_id: Uuid,
    pub position: i32,
    pub elapsed_seconds: i32,
}

/// Rank all completed records of one stage.
///
/// Pending records are left out rather than treated as worst-case. Inside a
/// shared position, entries are listed in the order their results were first
/// recorded, then by participant id, so the output is fully deterministic.
pub fn rank<'a, I>(records: I) -> Vec<RankedEntry>
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    let mut completed: Vec<&PerformanceRecord> = records
        .into_iter()
        .filter(|record| record.is_completed())
        .collect();

    completed.sort_by(|a, b| listing_order(a, b));

    let mut ranking = Vec::with_capacity(completed.len());
    let mut previous: Option<(i32, i32)> = None;

    for (index, record) in completed.iter().enumerate() {
        let position = match previous {
            Some((elapsed, position)) if elapsed == record.elapsed_seconds => position,
            _ => index as i32 + 1,
        };
        previous = Some((record.elapsed_seconds, position));

        ranking.push(RankedEntry {
            participant_id: record.participant_id,
            position,
            elapsed_seconds: record.elapsed_seconds,
        });
    }

    ranking
}

/// Rebuild a ranking from positions already persisted on the records
pub fn stored_ranking(records: &[PerformanceRecord]) -> Vec<RankedEntry> {
    let mut positioned: Vec<(&PerformanceRecord, i32)> = records
        .iter()
        .filter(|record| record.is_completed())
        .filter_map(|record| record.position.map(|position| (record, position)))
        .collect();

    positioned.sort_by(|(a, pa), (b, pb)| pa.cmp(pb).then_with(|| listing_order(a, b)));

    positioned
        .into_iter()
        .map(|(record, position)| RankedEntry {
            participant_id: record.participant_id,
            position,
            elapsed_seconds: record.elapsed_seconds,
        })
        .collect()
}

/// Whether any two entries share a position
pub fn has_ties(ranking: &[RankedEntry]) -> bool {
    ranking
        .windows(2)
        .any(|pair| pair[0].position == pair[1].position)
}

fn listing_order(a: &PerformanceRecord, b: &PerformanceRecord) -> Ordering {
    a.elapsed_seconds
        .cmp(&b.elapsed_seconds)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.participant_id.cmp(&b.participant_id))
}
