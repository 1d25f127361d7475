//! Storage port
//!
//! Every engine operation runs inside exactly one [`StoreTx`]. A transaction
//! that is dropped without [`StoreTx::commit`] leaves no trace, so an
//! operation either applies completely or not at all.
//!
//! Adapters must serialize transactions that lock the same stage or season:
//! the "read results, compute positions, write positions" sequence may not
//! interleave with another writer on that stage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    engine::{RankedEntry, Standing},
    error::AppResult,
    models::{
        ChampionRecord, ParticipantEntry, PerformanceRecord, Season, Stage, StageElimination,
        StageStatus,
    },
};

/// Entry point to a transactional store
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a new transaction
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>>;
}

/// Operations available inside one transaction
#[async_trait]
pub trait StoreTx: Send {
    // Season / stage directory

    async fn find_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>>;

    /// Read a season and hold it against concurrent finalization
    async fn lock_season(&mut self, season_id: Uuid) -> AppResult<Option<Season>>;

    async fn mark_season_ended(&mut self, season_id: Uuid) -> AppResult<()>;

    /// All stages of a season ordered by `order`
    async fn list_stages(&mut self, season_id: Uuid) -> AppResult<Vec<Stage>>;

    async fn find_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>>;

    /// Read a stage and hold it against concurrent writers until commit
    async fn lock_stage(&mut self, stage_id: Uuid) -> AppResult<Option<Stage>>;

    async fn set_stage_status(&mut self, stage_id: Uuid, status: StageStatus) -> AppResult<Stage>;

    // Participant roster

    async fn find_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
    ) -> AppResult<Option<ParticipantEntry>>;

    async fn list_approved_entries(&mut self, season_id: Uuid) -> AppResult<Vec<ParticipantEntry>>;

    /// Flip an `approved` entry to `eliminated`; returns whether anything changed
    async fn eliminate_entry(
        &mut self,
        season_id: Uuid,
        participant_id: Uuid,
        stage_id: Uuid,
    ) -> AppResult<bool>;

    // Performance store

    /// Insert or correct a result, always leaving it `completed`
    async fn upsert_result(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        elapsed_seconds: i32,
    ) -> AppResult<PerformanceRecord>;

    /// Set the points of an existing result; `None` when there is no result
    async fn set_points(
        &mut self,
        stage_id: Uuid,
        participant_id: Uuid,
        points: i32,
    ) -> AppResult<Option<PerformanceRecord>>;

    /// Return a `completed` result to `pending` and drop its position; returns whether anything changed
    async fn withdraw_result(&mut self, stage_id: Uuid, participant_id: Uuid) -> AppResult<bool>;

    async fn list_results(&mut self, stage_id: Uuid) -> AppResult<Vec<PerformanceRecord>>;

    /// Persist a full stage ranking in one batch; unranked records lose their position
    async fn write_positions(&mut self, stage_id: Uuid, ranking: &[RankedEntry]) -> AppResult<()>;

    /// Sum of awarded points across every stage of the season
    async fn cumulative_points(&mut self, season_id: Uuid, participant_id: Uuid)
    -> AppResult<i64>;

    // Eliminations and champions

    async fn find_elimination(&mut self, stage_id: Uuid) -> AppResult<Option<StageElimination>>;

    /// Mark the stage's eliminations as applied; a repeat keeps the first marker
    async fn record_elimination(
        &mut self,
        stage_id: Uuid,
        fingerprint: &str,
        eliminated_count: i32,
    ) -> AppResult<()>;

    /// Champion records of a season ordered by final position
    async fn list_champions(&mut self, season_id: Uuid) -> AppResult<Vec<ChampionRecord>>;

    async fn insert_champion(
        &mut self,
        season_id: Uuid,
        standing: &Standing,
    ) -> AppResult<ChampionRecord>;

    /// Make every write of this transaction visible
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
