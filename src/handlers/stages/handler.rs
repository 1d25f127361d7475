//! Stage handler implementations

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedAdmin,
    services::{EliminationOutcome, EliminationService, PerformanceService, StageService},
    state::AppState,
};

use super::{
    request::{
        ApplyEliminationRequest, AwardPointsRequest, RecordResultRequest, TransitionStageRequest,
    },
    response::{EliminationPlanResponse, PerformanceResponse, RankingResponse, StageResponse},
};

/// Get the current stage ranking
pub async fn get_ranking(
    State(state): State<AppState>,
    Path(stage_id): Path<Uuid>,
) -> AppResult<Json<RankingResponse>> {
    let entries = PerformanceService::get_ranking(state.store(), stage_id).await?;

    Ok(Json(RankingResponse { stage_id, entries }))
}

/// Record or correct a participant's result
pub async fn record_result(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path((stage_id, participant_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<RecordResultRequest>,
) -> AppResult<Json<PerformanceResponse>> {
    payload.validate()?;

    tracing::debug!(admin = %admin.subject, stage_id = %stage_id, "Recording result");

    let record = PerformanceService::record_result(
        state.store(),
        stage_id,
        participant_id,
        payload.elapsed_seconds,
    )
    .await?;

    Ok(Json(record.into()))
}

/// Award stage points to a participant
pub async fn award_points(
    State(state): State<AppState>,
    Path((stage_id, participant_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<AwardPointsRequest>,
) -> AppResult<Json<PerformanceResponse>> {
    payload.validate()?;

    let record =
        PerformanceService::award_points(state.store(), stage_id, participant_id, payload.points)
            .await?;

    Ok(Json(record.into()))
}

/// Advance a stage's status
pub async fn transition_stage(
    State(state): State<AppState>,
    Path(stage_id): Path<Uuid>,
    Json(payload): Json<TransitionStageRequest>,
) -> AppResult<Json<StageResponse>> {
    let stage = StageService::transition_stage(state.store(), stage_id, payload.status).await?;

    Ok(Json(stage.into()))
}

/// Preview the eliminations for a stage
pub async fn plan_eliminations(
    State(state): State<AppState>,
    Path(stage_id): Path<Uuid>,
) -> AppResult<Json<EliminationPlanResponse>> {
    let plan = EliminationService::plan_eliminations(state.store(), stage_id).await?;

    Ok(Json(plan.into()))
}

/// Apply a previewed elimination plan
pub async fn apply_elimination(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(stage_id): Path<Uuid>,
    Json(payload): Json<ApplyEliminationRequest>,
) -> AppResult<Json<EliminationOutcome>> {
    payload.validate()?;

    tracing::info!(
        admin = %admin.subject,
        stage_id = %stage_id,
        participants = payload.participants.len(),
        "Elimination confirmed"
    );

    let outcome = EliminationService::apply_elimination(
        state.store(),
        stage_id,
        &payload.participants,
        &payload.fingerprint,
    )
    .await?;

    Ok(Json(outcome))
}
