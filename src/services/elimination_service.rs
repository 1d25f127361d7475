//! Elimination service
//!
//! Previews and applies the cut at the end of a stage. Applying re-derives
//! the plan under the stage lock and refuses to act unless the caller
//! confirms exactly what is current.
//!
//! Locks are always taken season first, then stages in stage order, the same
//! order result entry and finalization use.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    db::{Store, StoreTx},
    engine::{self, EliminationPlan},
    error::{AppError, AppResult},
    models::Stage,
    services::PerformanceService,
    utils::validate_fingerprint,
};

/// What an applied elimination changed
#[derive(Debug, Clone, Serialize)]
pub struct EliminationOutcome {
    pub stage_id: Uuid,
    pub eliminated_count: usize,
    /// Entries flipped to `eliminated` by this call
    pub eliminated: Vec<Uuid>,
    /// Candidates that were already eliminated
    pub unchanged: Vec<Uuid>,
}

/// Elimination service
pub struct EliminationService;

impl EliminationService {
    /// Preview who falls outside the stage's advancement quota
    pub async fn plan_eliminations(store: &dyn Store, stage_id: Uuid) -> AppResult<EliminationPlan> {
        let mut tx = store.begin().await?;

        let stage = tx
            .find_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?;

        let plan = Self::build_plan(tx.as_mut(), &stage).await?;

        if plan.has_tie_at_cut() {
            warn!(
                stage_id = %stage_id,
                tied = plan.tied_at_cut.len(),
                "Advancement cut splits a tie"
            );
        }

        Ok(plan)
    }

    /// Eliminate the previewed candidates if the plan is still current
    pub async fn apply_elimination(
        store: &dyn Store,
        stage_id: Uuid,
        participants: &[Uuid],
        fingerprint: &str,
    ) -> AppResult<EliminationOutcome> {
        validate_fingerprint(fingerprint)?;

        let mut tx = store.begin().await?;

        let season_id = tx
            .find_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?
            .season_id;
        tx.lock_season(season_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Season not found".to_string()))?;

        let stage = tx
            .lock_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?;

        let plan = Self::build_plan(tx.as_mut(), &stage).await?;

        if !plan.matches(participants, fingerprint) {
            warn!(
                stage_id = %stage_id,
                confirmed = participants.len(),
                planned = plan.candidates.len(),
                "Elimination rejected: plan no longer matches the ranking"
            );
            return Err(AppError::StalePlan);
        }

        let mut eliminated = Vec::new();
        let mut unchanged = Vec::new();

        for participant_id in &plan.candidates {
            if tx
                .eliminate_entry(stage.season_id, *participant_id, stage_id)
                .await?
            {
                eliminated.push(*participant_id);
            } else {
                unchanged.push(*participant_id);
            }
        }

        let withdrawn = Self::withdraw_later_results(tx.as_mut(), &stage, &eliminated).await?;

        let eliminated_count = eliminated.len();
        tx.record_elimination(stage_id, &plan.fingerprint, eliminated_count as i32)
            .await?;
        tx.commit().await?;

        info!(
            stage_id = %stage_id,
            eliminated = eliminated_count,
            unchanged = unchanged.len(),
            withdrawn,
            "Elimination applied"
        );

        Ok(EliminationOutcome {
            stage_id,
            eliminated_count,
            eliminated,
            unchanged,
        })
    }

    /// Send the eliminated participants' results in later stages back to
    /// `pending` and re-rank every stage that lost a result
    async fn withdraw_later_results(
        tx: &mut dyn StoreTx,
        stage: &Stage,
        eliminated: &[Uuid],
    ) -> AppResult<usize> {
        if eliminated.is_empty() {
            return Ok(0);
        }

        let mut withdrawn = 0;
        let stages = tx.list_stages(stage.season_id).await?;

        for later in stages.iter().filter(|later| later.order > stage.order) {
            tx.lock_stage(later.id).await?;

            let mut changed = false;
            for participant_id in eliminated {
                if tx.withdraw_result(later.id, *participant_id).await? {
                    withdrawn += 1;
                    changed = true;
                }
            }

            if changed {
                debug!(
                    stage_id = %later.id,
                    eliminated_in = %stage.id,
                    "Re-ranking after eliminated results were withdrawn"
                );
                PerformanceService::recompute_positions(tx, later.id).await?;
            }
        }

        Ok(withdrawn)
    }

    async fn build_plan(tx: &mut dyn StoreTx, stage: &Stage) -> AppResult<EliminationPlan> {
        let quota = stage
            .quota()
            .ok_or(AppError::NoQuotaConfigured(stage.id))?;

        if !stage.status.is_final() {
            return Err(AppError::NotEligible(format!(
                "Stage is {}; eliminations need a completed stage",
                stage.status
            )));
        }

        let records = tx.list_results(stage.id).await?;
        let ranking = engine::rank(&records);

        let ranked: HashSet<Uuid> = ranking.iter().map(|entry| entry.participant_id).collect();
        let missing_results = tx
            .list_approved_entries(stage.season_id)
            .await?
            .into_iter()
            .map(|entry| entry.participant_id)
            .filter(|participant_id| !ranked.contains(participant_id))
            .collect();

        Ok(engine::plan_eliminations(
            stage.id,
            quota,
            &ranking,
            missing_results,
        ))
    }
}
