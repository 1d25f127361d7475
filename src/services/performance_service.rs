//! Performance service
//!
//! Records results and keeps the stage ranking in step with them. The
//! "read results, rank, write positions" sequence always runs inside the
//! same transaction as the write that triggered it, with the season and
//! stage rows held.

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::{Store, StoreTx},
    engine::{self, RankedEntry},
    error::{AppError, AppResult},
    models::{PerformanceRecord, Stage},
    utils::{validate_elapsed_seconds, validate_points},
};

/// Performance service for result entry and ranking reads
pub struct PerformanceService;

impl PerformanceService {
    /// Record (or correct) a participant's completion time and re-rank the stage
    pub async fn record_result(
        store: &dyn Store,
        stage_id: Uuid,
        participant_id: Uuid,
        elapsed_seconds: i64,
    ) -> AppResult<PerformanceRecord> {
        let elapsed_seconds = validate_elapsed_seconds(elapsed_seconds)?;

        let mut tx = store.begin().await?;

        let stage = Self::open_stage(tx.as_mut(), stage_id).await?;

        if !stage.status.accepts_results() {
            return Err(AppError::NotEligible(format!(
                "Stage is {} and does not accept results yet",
                stage.status
            )));
        }

        let entry = tx
            .find_entry(stage.season_id, participant_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Participant is not on this season's roster".to_string())
            })?;

        if !entry.is_approved() {
            return Err(AppError::NotEligible(format!(
                "Participant is {} in this season",
                entry.status
            )));
        }

        let mut record = tx
            .upsert_result(stage_id, participant_id, elapsed_seconds)
            .await?;

        let ranking = Self::recompute_positions(tx.as_mut(), stage_id).await?;
        record.position = ranking
            .iter()
            .find(|entry| entry.participant_id == participant_id)
            .map(|entry| entry.position);

        tx.commit().await?;

        info!(
            stage_id = %stage_id,
            participant_id = %participant_id,
            elapsed_seconds,
            position = ?record.position,
            "Result recorded"
        );

        Ok(record)
    }

    /// Current stage ranking as last persisted
    pub async fn get_ranking(store: &dyn Store, stage_id: Uuid) -> AppResult<Vec<RankedEntry>> {
        let mut tx = store.begin().await?;

        tx.find_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?;

        let records = tx.list_results(stage_id).await?;
        Ok(engine::stored_ranking(&records))
    }

    /// Set the points a participant earned in a stage
    pub async fn award_points(
        store: &dyn Store,
        stage_id: Uuid,
        participant_id: Uuid,
        points: i32,
    ) -> AppResult<PerformanceRecord> {
        let points = validate_points(points)?;

        let mut tx = store.begin().await?;

        Self::open_stage(tx.as_mut(), stage_id).await?;

        let record = tx
            .set_points(stage_id, participant_id, points)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No result recorded for this participant".to_string())
            })?;

        tx.commit().await?;

        info!(
            stage_id = %stage_id,
            participant_id = %participant_id,
            points,
            "Points awarded"
        );

        Ok(record)
    }

    /// Rank every completed result of the stage and persist the positions
    pub(crate) async fn recompute_positions(
        tx: &mut dyn StoreTx,
        stage_id: Uuid,
    ) -> AppResult<Vec<RankedEntry>> {
        let records = tx.list_results(stage_id).await?;
        let ranking = engine::rank(&records);

        tx.write_positions(stage_id, &ranking).await?;

        debug!(
            stage_id = %stage_id,
            records = records.len(),
            ranked = ranking.len(),
            "Stage positions recomputed"
        );

        Ok(ranking)
    }

    /// Lock a stage that still takes writes to its results.
    ///
    /// Season row first, then the stage row: the order finalization uses.
    async fn open_stage(tx: &mut dyn StoreTx, stage_id: Uuid) -> AppResult<Stage> {
        let season_id = tx
            .find_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?
            .season_id;

        let season = tx
            .lock_season(season_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Season not found".to_string()))?;

        let stage = tx
            .lock_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?;

        if season.is_ended() {
            return Err(AppError::StageClosed(
                "Season has been finalized".to_string(),
            ));
        }

        if tx.find_elimination(stage_id).await?.is_some() {
            return Err(AppError::StageClosed(
                "Eliminations have already been applied for this stage".to_string(),
            ));
        }

        Ok(stage)
    }
}
