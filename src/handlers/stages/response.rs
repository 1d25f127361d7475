//! Stage response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    engine::{EliminationPlan, RankedEntry},
    models::{PerformanceRecord, PerformanceStatus, Stage, StageStatus},
};

/// Stage response
#[derive(Debug, Serialize)]
pub struct StageResponse {
    pub id: Uuid,
    pub season_id: Uuid,
    pub name: String,
    pub order: i32,
    pub status: StageStatus,
    pub advancement_quota: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl From<Stage> for StageResponse {
    fn from(stage: Stage) -> Self {
        Self {
            id: stage.id,
            season_id: stage.season_id,
            name: stage.name,
            order: stage.order,
            status: stage.status,
            advancement_quota: stage.advancement_quota,
            updated_at: stage.updated_at,
        }
    }
}

/// Performance record response
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub stage_id: Uuid,
    pub participant_id: Uuid,
    pub elapsed_seconds: i32,
    pub position: Option<i32>,
    pub status: PerformanceStatus,
    pub points: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl From<PerformanceRecord> for PerformanceResponse {
    fn from(record: PerformanceRecord) -> Self {
        Self {
            stage_id: record.stage_id,
            participant_id: record.participant_id,
            elapsed_seconds: record.elapsed_seconds,
            position: record.position,
            status: record.status,
            points: record.points,
            updated_at: record.updated_at,
        }
    }
}

/// Stage ranking response
#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub stage_id: Uuid,
    pub entries: Vec<RankedEntry>,
}

/// Elimination preview response
#[derive(Debug, Serialize)]
pub struct EliminationPlanResponse {
    #[serde(flatten)]
    pub plan: EliminationPlan,
    /// `false` when nobody falls outside the quota
    pub action_needed: bool,
}

impl From<EliminationPlan> for EliminationPlanResponse {
    fn from(plan: EliminationPlan) -> Self {
        let action_needed = plan.action_needed();
        Self {
            plan,
            action_needed,
        }
    }
}
