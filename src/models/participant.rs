//! Participant roster model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Roster status of an admitted participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "roster_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RosterStatus {
    Approved,
    Eliminated,
}

impl RosterStatus {
    /// Status after elimination, or `None` when there is nothing to flip.
    /// There is no path back to `Approved`.
    pub fn eliminate(self) -> Option<Self> {
        match self {
            Self::Approved => Some(Self::Eliminated),
            Self::Eliminated => None,
        }
    }
}

impl std::fmt::Display for RosterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Eliminated => write!(f, "eliminated"),
        }
    }
}

/// A participant's admission record for a season
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ParticipantEntry {
    pub id: Uuid,
    pub season_id: Uuid,
    pub participant_id: Uuid,
    pub status: RosterStatus,
    pub eliminated_in_stage: Option<Uuid>,
    pub eliminated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ParticipantEntry {
    pub fn is_approved(&self) -> bool {
        self.status == RosterStatus::Approved
    }
}
