//! Champion service
//!
//! Finalization is the one write in the engine that is never retried: if a
//! champion record fails to persist, the error is reported with how far the
//! write got and the transaction is abandoned.

use std::collections::HashMap;

use tracing::{error, info};
use uuid::Uuid;

use crate::{
    db::Store,
    engine,
    error::{AppError, AppResult},
    models::{ChampionRecord, Stage},
};

/// Champion service
pub struct ChampionService;

impl ChampionService {
    /// Persist the season's final standings from its terminal stage
    pub async fn finalize(store: &dyn Store, season_id: Uuid) -> AppResult<Vec<ChampionRecord>> {
        let mut tx = store.begin().await?;

        let season = tx
            .lock_season(season_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Season not found".to_string()))?;

        if season.is_ended() || !tx.list_champions(season_id).await?.is_empty() {
            return Err(AppError::AlreadyFinalized(season_id));
        }

        let stages = tx.list_stages(season_id).await?;
        let terminal = Stage::terminal(&stages)
            .ok_or_else(|| AppError::NotEligible("Season has no stages".to_string()))?;

        if !terminal.status.is_final() {
            return Err(AppError::NotEligible(format!(
                "Terminal stage '{}' is {}; it must be completed first",
                terminal.name, terminal.status
            )));
        }

        // Result corrections on the terminal stage wait until this commits.
        tx.lock_stage(terminal.id).await?;
        let records = tx.list_results(terminal.id).await?;
        let ranking = engine::rank(&records);

        let mut points = HashMap::with_capacity(ranking.len());
        for entry in &ranking {
            let total = tx.cumulative_points(season_id, entry.participant_id).await?;
            points.insert(entry.participant_id, total);
        }

        let standings = engine::build_standings(&ranking, &points)?;

        let mut champions = Vec::with_capacity(standings.len());
        for standing in &standings {
            match tx.insert_champion(season_id, standing).await {
                Ok(record) => champions.push(record),
                Err(e) => {
                    error!(
                        season_id = %season_id,
                        written = champions.len(),
                        total = standings.len(),
                        error = %e,
                        "Finalization failed part-way; nothing was committed"
                    );
                    return Err(e);
                }
            }
        }

        tx.mark_season_ended(season_id).await?;
        tx.commit().await?;

        info!(
            season_id = %season_id,
            terminal_stage_id = %terminal.id,
            champions = champions.len(),
            "Season finalized"
        );

        Ok(champions)
    }

    /// Champion records of a season, by final position
    pub async fn list_champions(
        store: &dyn Store,
        season_id: Uuid,
    ) -> AppResult<Vec<ChampionRecord>> {
        let mut tx = store.begin().await?;

        tx.find_season(season_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Season not found".to_string()))?;

        tx.list_champions(season_id).await
    }
}
