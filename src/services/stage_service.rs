//! Stage administration service

use tracing::info;
use uuid::Uuid;

use crate::{
    db::Store,
    error::{AppError, AppResult},
    models::{Stage, StageStatus},
};

/// Stage service
pub struct StageService;

impl StageService {
    /// Move a stage one step along `upcoming → ongoing → completed`
    pub async fn transition_stage(
        store: &dyn Store,
        stage_id: Uuid,
        target: StageStatus,
    ) -> AppResult<Stage> {
        let mut tx = store.begin().await?;

        let stage = tx
            .lock_stage(stage_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Stage not found".to_string()))?;

        if !stage.status.can_transition_to(target) {
            return Err(AppError::InvalidTransition {
                from: stage.status,
                to: target,
            });
        }

        let updated = tx.set_stage_status(stage_id, target).await?;
        tx.commit().await?;

        info!(
            stage_id = %stage_id,
            from = %stage.status,
            to = %target,
            "Stage status changed"
        );

        Ok(updated)
    }
}
