//! Champion record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Permanent final standing of a participant at season end
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChampionRecord {
    pub id: Uuid,
    pub season_id: Uuid,
    pub participant_id: Uuid,
    /// 1 = champion, 2.. = runners-up
    pub final_position: i32,
    pub final_points: i64,
    pub created_at: DateTime<Utc>,
}
