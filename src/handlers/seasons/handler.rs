//! Season handler implementations

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    error::AppResult, middleware::auth::AuthenticatedAdmin, services::ChampionService,
    state::AppState,
};

use super::response::ChampionsResponse;

/// Finalize a season from its terminal stage
pub async fn finalize_season(
    State(state): State<AppState>,
    admin: AuthenticatedAdmin,
    Path(season_id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<ChampionsResponse>)> {
    tracing::info!(admin = %admin.subject, season_id = %season_id, "Finalization requested");

    let champions = ChampionService::finalize(state.store(), season_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ChampionsResponse::new(season_id, champions)),
    ))
}

/// List a season's champion records
pub async fn list_champions(
    State(state): State<AppState>,
    Path(season_id): Path<Uuid>,
) -> AppResult<Json<ChampionsResponse>> {
    let champions = ChampionService::list_champions(state.store(), season_id).await?;

    Ok(Json(ChampionsResponse::new(season_id, champions)))
}
