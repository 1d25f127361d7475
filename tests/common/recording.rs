//! Store wrapper that records the calls a service makes and can fail a
//! chosen champion insert

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gauntlet::{
    AppError, AppResult,
    db::{MemoryStore, Store, StoreTx},
    engine::{RankedEntry, Standing},
    models::{
        ChampionRecord, ParticipantEntry, PerformanceRecord, Season, Stage, StageElimination,
        StageStatus,
    },
};
use uuid::Uuid;

/// One observed store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LockSeason(Uuid),
    LockStage(Uuid),
    ListResults(Uuid),
    UpsertResult(Uuid),
    InsertChampion,
    Commit,
}

#[derive(Clone)]
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Arc<Mutex<Vec<Call>>>,
    fail_champion_insert: Option<usize>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_champion_insert: None,
        }
    }

    /// Make the `n`th champion insert of each transaction fail (1-based)
    pub fn failing_champion_insert(mut self, n: usize) -> Self {
        self.fail_champion_insert = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for RecordingStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let inner = self.inner.begin().await?;
        Ok(Box::new(RecordingTx {
            inner,
            calls: self.calls.clone(),
            fail_champion_insert: self.fail_champion_insert,
            champion_inserts: 0,
        }))
    }
}

struct RecordingTx {
    inner: Box<dyn StoreTx>,
    calls: Arc<Mutex<Vec<Call>>>,
    fail_champion_insert: Option<usize>,
    champion_inserts: usize,
}

impl RecordingTx {
    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl StoreTx for RecordingTx {
    async fn find_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>> {
        self.inner.find_season(season_id).await
    }

    async fn lock_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>> {
        self.push(Call::LockSeason(season_id));
        self.inner.lock_season(season_id).await
    }

    async fn mark_season_ended(&mut self, season_id: Uuid) -> AppResult<()> {
        self.inner.mark_season_ended(season_id).await
    }

    async fn list_stages(&mut self, season_id: Uuid) -> AppResult<Vec<Stage>> {
        self.inner.list_stages(season_id).await
    }

    async fn find_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>> {
        self.inner.find_stage(stage_id).await
    }

    async fn lock_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>> {
        self.push(Call::LockStage(stage_id));
        self.inner.lock_stage(stage_id).await
    }

    async fn set_stage_status(&mut self, stage_id: Uuid, status: StageStatus) -> AppResult<Stage> {
        self.inner.set_stage_status(stage_id, status).await
    }

    async fn find_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
    ) -> AppResult<Option<ParticipantEntry>> {
        self.inner.find_entry(season_id, participant_id).await
    }

    async fn list_approved_entries(&mut self, season_id: Uuid) -> AppResult<Vec<ParticipantEntry>> {
        self.inner.list_approved_entries(season_id).await
    }

    async fn eliminate_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
        stage_id: Uuid,
    ) -> AppResult<bool> {
        self.inner
            .eliminate_entry(season_id, participant_id, stage_id)
            .await
    }

    async fn upsert_result(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        elapsed_seconds: i32,
    ) -> AppResult<PerformanceRecord> {
        self.push(Call::UpsertResult(stage_id));
        self.inner
            .upsert_result(stage_id, participant_id, elapsed_seconds)
            .await
    }

    async fn set_points(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        points: i32,
    ) -> AppResult<Option<PerformanceRecord>> {
        self.inner.set_points(stage_id, participant_id, points).await
    }

    async fn withdraw_result(&mut self, stage_id: Uuid, participant_id: Uuid) -> AppResult<bool> {
        self.inner.withdraw_result(stage_id, participant_id).await
    }

    async fn list_results(&mut self, stage_id: Uuid) -> AppResult<Vec<PerformanceRecord>> {
        self.push(Call::ListResults(stage_id));
        self.inner.list_results(stage_id).await
    }

    async fn write_positions(&mut self, stage_id: Uuid, ranking: &[RankedEntry]) -> AppResult<()> {
        self.inner.write_positions(stage_id, ranking).await
    }

    async fn cumulative_points(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
    ) -> AppResult<i64> {
        self.inner.cumulative_points(season_id, participant_id).await
    }

    async fn find_elimination(&mut self, stage_id: Uuid) -> AppResult<Option<StageElimination>> {
        self.inner.find_elimination(stage_id).await
    }

    async fn record_elimination(
        &mut self,
        stage_id: Uuid,
        fingerprint: &str,
        eliminated_count: i32,
    ) -> AppResult<()> {
        self.inner
            .record_elimination(stage_id, fingerprint, eliminated_count)
            .await
    }

    async fn list_champions(&mut self, season_id: Uuid) -> AppResult<Vec<ChampionRecord>> {
        self.inner.list_champions(season_id).await
    }

    async fn insert_champion(
        &mut self,
        season_id: Uuid,
        standing: &Standing,
    ) -> AppResult<ChampionRecord> {
        self.push(Call::InsertChampion);
        self.champion_inserts += 1;
        if self.fail_champion_insert == Some(self.champion_inserts) {
            return Err(AppError::Database("connection lost mid-write".to_string()));
        }
        self.inner.insert_champion(season_id, standing).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.push(Call::Commit);
        let RecordingTx { inner, .. } = *self;
        inner.commit().await
    }
}
