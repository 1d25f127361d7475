//! Season model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Season lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "season_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeasonStatus {
    Upcoming,
    Active,
    Ended,
}

impl std::fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Active => write!(f, "active"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Season database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Season {
    pub id: Uuid,
    pub name: String,
    pub year: i32,
    pub status: SeasonStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Season {
    /// An ended season only accepts champion linkage, never new results
    pub fn is_ended(&self) -> bool {
        self.status == SeasonStatus::Ended
    }
}
