//! PostgreSQL store adapter

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{
    repositories::{ChampionRepository, PerformanceRepository, RosterRepository, SeasonRepository},
    store::{Store, StoreTx},
};
use crate::{
    engine::{RankedEntry, Standing},
    error::AppResult,
    models::{
        ChampionRecord, ParticipantEntry, PerformanceRecord, Season, Stage, StageElimination,
        StageStatus,
    },
};

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgStoreTx { tx }))
    }
}

/// One PostgreSQL transaction; rolled back by sqlx when dropped uncommitted
pub struct PgStoreTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PgStoreTx {
    async fn find_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>> {
        SeasonRepository::find_by_id(&mut self.tx, &season_id).await
    }

    async fn lock_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>> {
        SeasonRepository::lock_by_id(&mut self.tx, &season_id).await
    }

    async fn mark_season_ended(&mut self, season_id: Uuid) -> AppResult<()> {
        SeasonRepository::mark_ended(&mut self.tx, &season_id).await
    }

    async fn list_stages(&mut self, season_id: Uuid) -> AppResult<Vec<Stage>> {
        SeasonRepository::list_stages(&mut self.tx, &season_id).await
    }

    async fn find_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>> {
        SeasonRepository::find_stage(&mut self.tx, &stage_id).await
    }

    async fn lock_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>> {
        SeasonRepository::lock_stage(&mut self.tx, &stage_id).await
    }

    async fn set_stage_status(&mut self, stage_id: Uuid, status: StageStatus) -> AppResult<Stage> {
        SeasonRepository::update_stage_status(&mut self.tx, &stage_id, status).await
    }

    async fn find_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
    ) -> AppResult<Option<ParticipantEntry>> {
        RosterRepository::find(&mut self.tx, &season_id, &participant_id).await
    }

    async fn list_approved_entries(&mut self, season_id: Uuid) -> AppResult<Vec<ParticipantEntry>> {
        RosterRepository::list_approved(&mut self.tx, &season_id).await
    }

    async fn eliminate_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
        stage_id: Uuid,
    ) -> AppResult<bool> {
        RosterRepository::eliminate(&mut self.tx, &season_id, &participant_id, &stage_id).await
    }

    async fn upsert_result(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        elapsed_seconds: i32,
    ) -> AppResult<PerformanceRecord> {
        PerformanceRepository::upsert(&mut self.tx, &stage_id, &participant_id, elapsed_seconds)
            .await
    }

    async fn set_points(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        points: i32,
    ) -> AppResult<Option<PerformanceRecord>> {
        PerformanceRepository::set_points(&mut self.tx, &stage_id, &participant_id, points).await
    }

    async fn withdraw_result(&mut self, stage_id: Uuid, participant_id: Uuid) -> AppResult<bool> {
        PerformanceRepository::withdraw(&mut self.tx, &stage_id, &participant_id).await
    }

    async fn list_results(&mut self, stage_id: Uuid) -> AppResult<Vec<PerformanceRecord>> {
        PerformanceRepository::list_by_stage(&mut self.tx, &stage_id).await
    }

    async fn write_positions(&mut self, stage_id: Uuid, ranking: &[RankedEntry]) -> AppResult<()> {
        PerformanceRepository::write_positions(&mut self.tx, &stage_id, ranking).await
    }

    async fn cumulative_points(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
    ) -> AppResult<i64> {
        PerformanceRepository::cumulative_points(&mut self.tx, &season_id, &participant_id).await
    }

    async fn find_elimination(&mut self, stage_id: Uuid) -> AppResult<Option<StageElimination>> {
        PerformanceRepository::find_elimination(&mut self.tx, &stage_id).await
    }

    async fn record_elimination(
        &mut self,
        stage_id: Uuid,
        fingerprint: &str,
        eliminated_count: i32,
    ) -> AppResult<()> {
        PerformanceRepository::insert_elimination(
            &mut self.tx,
            &stage_id,
            fingerprint,
            eliminated_count,
        )
        .await
    }

    async fn list_champions(&mut self, season_id: Uuid) -> AppResult<Vec<ChampionRecord>> {
        ChampionRepository::list_by_season(&mut self.tx, &season_id).await
    }

    async fn insert_champion(
        &mut self,
        season_id: Uuid,
        standing: &Standing,
    ) -> AppResult<ChampionRecord> {
        ChampionRepository::insert(&mut self.tx, &season_id, standing).await
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
