//! Performance record repository

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    engine::RankedEntry,
    error::AppResult,
    models::{PerformanceRecord, StageElimination},
};

/// Repository for stage results and their derived positions
pub struct PerformanceRepository;

impl PerformanceRepository {
    /// Insert a result or correct the existing one for the same (stage, participant)
    pub async fn upsert(
        conn: &mut PgConnection,
        stage_id: &Uuid,
        participant_id: &Uuid,
        elapsed_seconds: i32,
    ) -> AppResult<PerformanceRecord> {
        let record = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            INSERT INTO performance_records (stage_id, participant_id, elapsed_seconds, status)
            VALUES ($1, $2, $3, 'completed')
            ON CONFLICT (stage_id, participant_id) DO UPDATE
            SET
                elapsed_seconds = EXCLUDED.elapsed_seconds,
                status = 'completed',
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(stage_id)
        .bind(participant_id)
        .bind(elapsed_seconds)
        .fetch_one(conn)
        .await?;

        Ok(record)
    }

    /// Set awarded points on an existing result
    pub async fn set_points(
        conn: &mut PgConnection,
        stage_id: &Uuid,
        participant_id: &Uuid,
        points: i32,
    ) -> AppResult<Option<PerformanceRecord>> {
        let record = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            UPDATE performance_records
            SET points = $3, updated_at = NOW()
            WHERE stage_id = $1 AND participant_id = $2
            RETURNING *
            "#,
        )
        .bind(stage_id)
        .bind(participant_id)
        .bind(points)
        .fetch_optional(conn)
        .await?;

        Ok(record)
    }

    /// Put a completed result back to pending, clearing its position
    pub async fn withdraw(
        conn: &mut PgConnection,
        stage_id: &Uuid,
        participant_id: &Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE performance_records
            SET status = 'pending', position = NULL, updated_at = NOW()
            WHERE stage_id = $1 AND participant_id = $2 AND status = 'completed'
            "#,
        )
        .bind(stage_id)
        .bind(participant_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all results of a stage
    pub async fn list_by_stage(
        conn: &mut PgConnection,
        stage_id: &Uuid,
    ) -> AppResult<Vec<PerformanceRecord>> {
        let records = sqlx::query_as::<_, PerformanceRecord>(
            r#"
            SELECT * FROM performance_records
            WHERE stage_id = $1
            ORDER BY created_at, participant_id
            "#,
        )
        .bind(stage_id)
        .fetch_all(conn)
        .await?;

        Ok(records)
    }

    /// Write a full stage ranking: ranked rows get their position, the rest are cleared
    pub async fn write_positions(
        conn: &mut PgConnection,
        stage_id: &Uuid,
        ranking: &[RankedEntry],
    ) -> AppResult<()> {
        let participant_ids: Vec<Uuid> = ranking.iter().map(|e| e.participant_id).collect();
        let positions: Vec<i32> = ranking.iter().map(|e| e.position).collect();

        sqlx::query(
            r#"
            UPDATE performance_records
            SET position = NULL
            WHERE stage_id = $1 AND NOT (participant_id = ANY($2))
            "#,
        )
        .bind(stage_id)
        .bind(&participant_ids)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            UPDATE performance_records AS pr
            SET position = ranked.position
            FROM UNNEST($2::uuid[], $3::int4[]) AS ranked(participant_id, position)
            WHERE pr.stage_id = $1 AND pr.participant_id = ranked.participant_id
            "#,
        )
        .bind(stage_id)
        .bind(&participant_ids)
        .bind(&positions)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Sum a participant's awarded points over every stage of a season
    pub async fn cumulative_points(
        conn: &mut PgConnection,
        season_id: &Uuid,
        participant_id: &Uuid,
    ) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(pr.points), 0)::BIGINT
            FROM performance_records pr
            JOIN stages s ON s.id = pr.stage_id
            WHERE s.season_id = $1 AND pr.participant_id = $2
            "#,
        )
        .bind(season_id)
        .bind(participant_id)
        .fetch_one(conn)
        .await?;

        Ok(total)
    }

    /// Find the elimination marker of a stage
    pub async fn find_elimination(
        conn: &mut PgConnection,
        stage_id: &Uuid,
    ) -> AppResult<Option<StageElimination>> {
        let elimination = sqlx::query_as::<_, StageElimination>(
            r#"SELECT * FROM stage_eliminations WHERE stage_id = $1"#,
        )
        .bind(stage_id)
        .fetch_optional(conn)
        .await?;

        Ok(elimination)
    }

    /// Record that a stage's eliminations were applied
    pub async fn insert_elimination(
        conn: &mut PgConnection,
        stage_id: &Uuid,
        fingerprint: &str,
        eliminated_count: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stage_eliminations (stage_id, fingerprint, eliminated_count)
            VALUES ($1, $2, $3)
            ON CONFLICT (stage_id) DO NOTHING
            "#,
        )
        .bind(stage_id)
        .bind(fingerprint)
        .bind(eliminated_count)
        .execute(conn)
        .await?;

        Ok(())
    }
}
