//! Performance record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Completion status of a performance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "performance_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PerformanceStatus {
    Pending,
    Completed,
}

/// One participant's timed result for one stage.
///
/// At most one record exists per `(stage_id, participant_id)`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub id: Uuid,
    pub stage_id: Uuid,
    pub participant_id: Uuid,
    /// Completion time; lower is better
    pub elapsed_seconds: i32,
    /// Derived 1-based rank, `None` until computed
    pub position: Option<i32>,
    pub status: PerformanceStatus,
    /// Stage-awarded score, independent of position
    pub points: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PerformanceRecord {
    pub fn is_completed(&self) -> bool {
        self.status == PerformanceStatus::Completed
    }
}

/// Marker left on a stage once its eliminations have been applied
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StageElimination {
    pub stage_id: Uuid,
    pub fingerprint: String,
    pub eliminated_count: i32,
    pub applied_at: DateTime<Utc>,
}
