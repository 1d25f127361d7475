//! Champion record repository

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{engine::Standing, error::AppResult, models::ChampionRecord};

/// Repository for champion records. Rows are only ever inserted.
pub struct ChampionRepository;

impl ChampionRepository {
    /// List champion records of a season
    pub async fn list_by_season(
        conn: &mut PgConnection,
        season_id: &Uuid,
    ) -> AppResult<Vec<ChampionRecord>> {
        let records = sqlx::query_as::<_, ChampionRecord>(
            r#"
            SELECT * FROM champion_records
            WHERE season_id = $1
            ORDER BY final_position
            "#,
        )
        .bind(season_id)
        .fetch_all(conn)
        .await?;

        Ok(records)
    }

    /// Insert one final standing
    pub async fn insert(
        conn: &mut PgConnection,
        season_id: &Uuid,
        standing: &Standing,
    ) -> AppResult<ChampionRecord> {
        let record = sqlx::query_as::<_, ChampionRecord>(
            r#"
            INSERT INTO champion_records (season_id, participant_id, final_position, final_points)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(season_id)
        .bind(standing.participant_id)
        .bind(standing.final_position)
        .bind(standing.final_points)
        .fetch_one(conn)
        .await?;

        Ok(record)
    }
}
