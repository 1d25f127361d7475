//! Stage model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Stage lifecycle status
///
/// Stages only move forward: `upcoming → ongoing → completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "stage_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl StageStatus {
    /// The single status this one may advance to
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Upcoming => Some(Self::Ongoing),
            Self::Ongoing => Some(Self::Completed),
            Self::Completed => None,
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }

    /// Whether results may be entered or corrected
    pub fn accepts_results(self) -> bool {
        match self {
            Self::Upcoming => false,
            Self::Ongoing | Self::Completed => true,
        }
    }

    /// Whether the ranking is final enough to eliminate or finalize on
    pub fn is_final(self) -> bool {
        match self {
            Self::Upcoming | Self::Ongoing => false,
            Self::Completed => true,
        }
    }
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upcoming => write!(f, "upcoming"),
            Self::Ongoing => write!(f, "ongoing"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Stage database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Stage {
    pub id: Uuid,
    pub season_id: Uuid,
    pub name: String,
    #[sqlx(rename = "stage_order")]
    pub order: i32,
    pub status: StageStatus,
    /// Number of top-ranked participants who advance; `None` means no limit
    pub advancement_quota: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Stage {
    /// Advancement quota, if one is configured and positive
    pub fn quota(&self) -> Option<usize> {
        self.advancement_quota
            .filter(|quota| *quota > 0)
            .map(|quota| quota as usize)
    }

    /// Pick the terminal stage of a season: highest order, then latest start
    pub fn terminal(stages: &[Stage]) -> Option<&Stage> {
        stages
            .iter()
            .max_by(|a, b| a.order.cmp(&b.order).then(a.starts_at.cmp(&b.starts_at)))
    }
}
