//! In-memory store adapter
//!
//! Holds the whole dataset behind one async mutex. A transaction owns the
//! lock for its whole lifetime and works on a copy of the data, which is
//! published on commit and discarded otherwise. Used by the test-suite and
//! for local runs without a database.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::store::{Store, StoreTx};
use crate::{
    engine::{RankedEntry, Standing},
    error::{AppError, AppResult},
    models::{
        ChampionRecord, ParticipantEntry, PerformanceRecord, PerformanceStatus, RosterStatus,
        Season, SeasonStatus, Stage, StageElimination, StageStatus,
    },
};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    seasons: HashMap<Uuid, Season>,
    stages: HashMap<Uuid, Stage>,
    /// Keyed by (season, participant)
    entries: HashMap<(Uuid, Uuid), ParticipantEntry>,
    /// Keyed by (stage, participant)
    results: HashMap<(Uuid, Uuid), PerformanceRecord>,
    eliminations: HashMap<Uuid, StageElimination>,
    champions: Vec<ChampionRecord>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Strictly increasing timestamps so entry order is never ambiguous
    fn now(&mut self) -> DateTime<Utc> {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now
    }
}

/// Store kept entirely in process memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a season in `active` status
    pub async fn create_season(&self, name: &str, year: i32) -> Season {
        let mut state = self.state.lock().await;
        let now = state.now();
        let season = Season {
            id: Uuid::new_v4(),
            name: name.to_string(),
            year,
            status: SeasonStatus::Active,
            created_at: now,
            updated_at: now,
        };
        state.seasons.insert(season.id, season.clone());
        season
    }

    /// Create a stage; `order` must be unique within the season
    pub async fn create_stage(
        &self,
        season_id: Uuid,
        name: &str,
        order: i32,
        advancement_quota: Option<i32>,
        status: StageStatus,
    ) -> AppResult<Stage> {
        let mut state = self.state.lock().await;

        if !state.seasons.contains_key(&season_id) {
            return Err(AppError::NotFound("Season not found".to_string()));
        }
        if state
            .stages
            .values()
            .any(|stage| stage.season_id == season_id && stage.order == order)
        {
            return Err(AppError::Conflict(format!(
                "Stage order {} already used in season",
                order
            )));
        }

        let now = state.now();
        let stage = Stage {
            id: Uuid::new_v4(),
            season_id,
            name: name.to_string(),
            order,
            status,
            advancement_quota,
            starts_at: None,
            created_at: now,
            updated_at: now,
        };
        state.stages.insert(stage.id, stage.clone());
        Ok(stage)
    }

    /// Admit a participant to a season as `approved`
    pub async fn admit(&self, season_id: Uuid, participant_id: Uuid) -> AppResult<ParticipantEntry> {
        let mut state = self.state.lock().await;

        if !state.seasons.contains_key(&season_id) {
            return Err(AppError::NotFound("Season not found".to_string()));
        }
        if state.entries.contains_key(&(season_id, participant_id)) {
            return Err(AppError::Conflict("Participant already admitted".to_string()));
        }

        let now = state.now();
        let entry = ParticipantEntry {
            id: Uuid::new_v4(),
            season_id,
            participant_id,
            status: RosterStatus::Approved,
            eliminated_in_stage: None,
            eliminated_at: None,
            created_at: now,
        };
        state
            .entries
            .insert((season_id, participant_id), entry.clone());
        Ok(entry)
    }

    /// Current roster entry of a participant
    pub async fn entry(&self, season_id: Uuid, participant_id: Uuid) -> Option<ParticipantEntry> {
        let state = self.state.lock().await;
        state.entries.get(&(season_id, participant_id)).cloned()
    }

    /// Current result of a participant in a stage
    pub async fn result(&self, stage_id: Uuid, participant_id: Uuid) -> Option<PerformanceRecord> {
        let state = self.state.lock().await;
        state.results.get(&(stage_id, participant_id)).cloned()
    }

    /// Current state of a season
    pub async fn season(&self, season_id: Uuid) -> Option<Season> {
        let state = self.state.lock().await;
        state.seasons.get(&season_id).cloned()
    }

    /// Every result of a stage, in entry order
    pub async fn results(&self, stage_id: Uuid) -> Vec<PerformanceRecord> {
        let state = self.state.lock().await;
        let mut records: Vec<PerformanceRecord> = state
            .results
            .values()
            .filter(|record| record.stage_id == stage_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.participant_id.cmp(&b.participant_id))
        });
        records
    }

    /// Number of champion records across all seasons
    pub async fn champion_count(&self) -> usize {
        self.state.lock().await.champions.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let guard = self.state.clone().lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(MemoryTx { guard, working }))
    }
}

/// One in-memory transaction
pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    working: MemoryState,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn find_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>> {
        Ok(self.working.seasons.get(&season_id).cloned())
    }

    async fn lock_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>> {
        // The transaction already holds the store lock.
        self.find_season(season_id).await
    }

    async fn mark_season_ended(&mut self, season_id: Uuid) -> AppResult<()> {
        let now = self.working.now();
        if let Some(season) = self.working.seasons.get_mut(&season_id) {
            season.status = SeasonStatus::Ended;
            season.updated_at = now;
        }
        Ok(())
    }

    async fn list_stages(&mut self, season_id: Uuid) -> AppResult<Vec<Stage>> {
        let mut stages: Vec<Stage> = self
            .working
            .stages
            .values()
            .filter(|stage| stage.season_id == season_id)
            .cloned()
            .collect();
        stages.sort_by(|a, b| a.order.cmp(&b.order).then(a.starts_at.cmp(&b.starts_at)));
        Ok(stages)
    }

    async fn find_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>> {
        Ok(self.working.stages.get(&stage_id).cloned())
    }

    async fn lock_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>> {
        self.find_stage(stage_id).await
    }

    async fn set_stage_status(&mut self, stage_id: Uuid, status: StageStatus) -> AppResult<Stage> {
        let now = self.working.now();
        let stage = self
            .working
            .stages
            .get_mut(&stage_id)
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?;
        stage.status = status;
        stage.updated_at = now;
        Ok(stage.clone())
    }

    async fn find_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
    ) -> AppResult<Option<ParticipantEntry>> {
        Ok(self
            .working
            .entries
            .get(&(season_id, participant_id))
            .cloned())
    }

    async fn list_approved_entries(&mut self, season_id: Uuid) -> AppResult<Vec<ParticipantEntry>> {
        let mut entries: Vec<ParticipantEntry> = self
            .working
            .entries
            .values()
            .filter(|entry| entry.season_id == season_id && entry.is_approved())
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.participant_id.cmp(&b.participant_id))
        });
        Ok(entries)
    }

    async fn eliminate_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
        stage_id: Uuid,
    ) -> AppResult<bool> {
        let now = self.working.now();
        let Some(entry) = self.working.entries.get_mut(&(season_id, participant_id)) else {
            return Ok(false);
        };

        match entry.status.eliminate() {
            Some(status) => {
                entry.status = status;
                entry.eliminated_in_stage = Some(stage_id);
                entry.eliminated_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn upsert_result(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        elapsed_seconds: i32,
    ) -> AppResult<PerformanceRecord> {
        let now = self.working.now();
        let record = self
            .working
            .results
            .entry((stage_id, participant_id))
            .and_modify(|record| {
                record.elapsed_seconds = elapsed_seconds;
                record.status = PerformanceStatus::Completed;
                record.updated_at = now;
            })
            .or_insert_with(|| PerformanceRecord {
                id: Uuid::new_v4(),
                stage_id,
                participant_id,
                elapsed_seconds,
                position: None,
                status: PerformanceStatus::Completed,
                points: None,
                created_at: now,
                updated_at: now,
            });
        Ok(record.clone())
    }

    async fn set_points(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        points: i32,
    ) -> AppResult<Option<PerformanceRecord>> {
        let now = self.working.now();
        Ok(self
            .working
            .results
            .get_mut(&(stage_id, participant_id))
            .map(|record| {
                record.points = Some(points);
                record.updated_at = now;
                record.clone()
            }))
    }

    async fn withdraw_result(&mut self, stage_id: Uuid, participant_id: Uuid) -> AppResult<bool> {
        let now = self.working.now();
        let Some(record) = self.working.results.get_mut(&(stage_id, participant_id)) else {
            return Ok(false);
        };
        if !record.is_completed() {
            return Ok(false);
        }

        record.status = PerformanceStatus::Pending;
        record.position = None;
        record.updated_at = now;
        Ok(true)
    }

    async fn list_results(&mut self, stage_id: Uuid) -> AppResult<Vec<PerformanceRecord>> {
        let mut records: Vec<PerformanceRecord> = self
            .working
            .results
            .values()
            .filter(|record| record.stage_id == stage_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.participant_id.cmp(&b.participant_id))
        });
        Ok(records)
    }

    async fn write_positions(&mut self, stage_id: Uuid, ranking: &[RankedEntry]) -> AppResult<()> {
        let positions: HashMap<Uuid, i32> = ranking
            .iter()
            .map(|entry| (entry.participant_id, entry.position))
            .collect();

        for record in self
            .working
            .results
            .values_mut()
            .filter(|record| record.stage_id == stage_id)
        {
            record.position = positions.get(&record.participant_id).copied();
        }
        Ok(())
    }

    async fn cumulative_points(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
    ) -> AppResult<i64> {
        let stages = &self.working.stages;
        Ok(self
            .working
            .results
            .values()
            .filter(|record| record.participant_id == participant_id)
            .filter(|record| {
                stages
                    .get(&record.stage_id)
                    .is_some_and(|stage| stage.season_id == season_id)
            })
            .filter_map(|record| record.points)
            .map(i64::from)
            .sum())
    }

    async fn find_elimination(&mut self, stage_id: Uuid) -> AppResult<Option<StageElimination>> {
        Ok(self.working.eliminations.get(&stage_id).cloned())
    }

    async fn record_elimination(
        &mut self,
        stage_id: Uuid,
        fingerprint: &str,
        eliminated_count: i32,
    ) -> AppResult<()> {
        let now = self.working.now();
        self.working
            .eliminations
            .entry(stage_id)
            .or_insert_with(|| StageElimination {
                stage_id,
                fingerprint: fingerprint.to_string(),
                eliminated_count,
                applied_at: now,
            });
        Ok(())
    }

    async fn list_champions(&mut self, season_id: Uuid) -> AppResult<Vec<ChampionRecord>> {
        let mut records: Vec<ChampionRecord> = self
            .working
            .champions
            .iter()
            .filter(|record| record.season_id == season_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.final_position);
        Ok(records)
    }

    async fn insert_champion(
        &mut self,
        season_id: Uuid,
        standing: &Standing,
    ) -> AppResult<ChampionRecord> {
        let duplicate = self.working.champions.iter().any(|record| {
            record.season_id == season_id
                && (record.final_position == standing.final_position
                    || record.participant_id == standing.participant_id)
        });
        if duplicate {
            return Err(AppError::Conflict(
                "Record already exists: champion position or participant".to_string(),
            ));
        }

        let now = self.working.now();
        let record = ChampionRecord {
            id: Uuid::new_v4(),
            season_id,
            participant_id: standing.participant_id,
            final_position: standing.final_position,
            final_points: standing.final_points,
            created_at: now,
        };
        self.working.champions.push(record.clone());
        Ok(record)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTx { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
