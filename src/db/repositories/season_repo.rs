//! Season and stage repository

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Season, Stage, StageStatus},
};

/// Repository for the season/stage directory
pub struct SeasonRepository;

impl SeasonRepository {
    /// Find season by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Season>> {
        let season = sqlx::query_as::<_, Season>(r#"SELECT * FROM seasons WHERE id = $1"#)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(season)
    }

    /// Find season by ID, locking the row until the transaction ends
    pub async fn lock_by_id(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Season>> {
        let season =
            sqlx::query_as::<_, Season>(r#"SELECT * FROM seasons WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(season)
    }

    /// Close a season
    pub async fn mark_ended(conn: &mut PgConnection, id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"UPDATE seasons SET status = 'ended', updated_at = NOW() WHERE id = $1"#,
        )
        .bind(id)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// List the stages of a season in competition order
    pub async fn list_stages(conn: &mut PgConnection, season_id: &Uuid) -> AppResult<Vec<Stage>> {
        let stages = sqlx::query_as::<_, Stage>(
            r#"
            SELECT * FROM stages
            WHERE season_id = $1
            ORDER BY stage_order, starts_at NULLS FIRST
            "#,
        )
        .bind(season_id)
        .fetch_all(conn)
        .await?;

        Ok(stages)
    }

    /// Find stage by ID
    pub async fn find_stage(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Stage>> {
        let stage = sqlx::query_as::<_, Stage>(r#"SELECT * FROM stages WHERE id = $1"#)
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(stage)
    }

    /// Find stage by ID, locking the row until the transaction ends
    pub async fn lock_stage(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<Stage>> {
        let stage =
            sqlx::query_as::<_, Stage>(r#"SELECT * FROM stages WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(conn)
                .await?;

        Ok(stage)
    }

    /// Update stage status
    pub async fn update_stage_status(
        conn: &mut PgConnection,
        id: &Uuid,
        status: StageStatus,
    ) -> AppResult<Stage> {
        let stage = sqlx::query_as::<_, Stage>(
            r#"
            UPDATE stages
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_one(conn)
        .await?;

        Ok(stage)
    }
}
