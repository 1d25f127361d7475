//! Participant roster repository

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{error::AppResult, models::ParticipantEntry};

/// Repository for participant entries.
///
/// The only write is the `approved → eliminated` flip.
pub struct RosterRepository;

impl RosterRepository {
    /// Find a participant's entry for a season
    pub async fn find(
        conn: &mut PgConnection,
        season_id: &Uuid,
        participant_id: &Uuid,
    ) -> AppResult<Option<ParticipantEntry>> {
        let entry = sqlx::query_as::<_, ParticipantEntry>(
            r#"
            SELECT * FROM participant_entries
            WHERE season_id = $1 AND participant_id = $2
            "#,
        )
        .bind(season_id)
        .bind(participant_id)
        .fetch_optional(conn)
        .await?;

        Ok(entry)
    }

    /// List entries still approved for a season
    pub async fn list_approved(
        conn: &mut PgConnection,
        season_id: &Uuid,
    ) -> AppResult<Vec<ParticipantEntry>> {
        let entries = sqlx::query_as::<_, ParticipantEntry>(
            r#"
            SELECT * FROM participant_entries
            WHERE season_id = $1 AND status = 'approved'
            ORDER BY created_at, participant_id
            "#,
        )
        .bind(season_id)
        .fetch_all(conn)
        .await?;

        Ok(entries)
    }

    /// Eliminate an approved participant. Already eliminated entries are left alone.
    pub async fn eliminate(
        conn: &mut PgConnection,
        season_id: &Uuid,
        participant_id: &Uuid,
        stage_id: &Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE participant_entries
            SET status = 'eliminated', eliminated_in_stage = $3, eliminated_at = NOW()
            WHERE season_id = $1 AND participant_id = $2 AND status = 'approved'
            "#,
        )
        .bind(season_id)
        .bind(participant_id)
        .bind(stage_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
