//! Stage request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{FINGERPRINT_LENGTH, MAX_ELAPSED_SECONDS, MAX_STAGE_POINTS},
    models::StageStatus,
};

/// Record or correct a result
#[derive(Debug, Deserialize, Validate)]
pub struct RecordResultRequest {
    /// Completion time in whole seconds
    #[validate(range(min = 1, max = MAX_ELAPSED_SECONDS))]
    pub elapsed_seconds: i64,
}

/// Award stage points
#[derive(Debug, Deserialize, Validate)]
pub struct AwardPointsRequest {
    #[validate(range(min = 0, max = MAX_STAGE_POINTS))]
    pub points: i32,
}

/// Move a stage to its next status
#[derive(Debug, Deserialize)]
pub struct TransitionStageRequest {
    pub status: StageStatus,
}

/// Confirm a previewed elimination plan
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyEliminationRequest {
    /// Exactly the candidates returned by the preview
    pub participants: Vec<Uuid>,

    /// Fingerprint returned by the preview
    #[validate(length(equal = FINGERPRINT_LENGTH))]
    pub fingerprint: String,
}
