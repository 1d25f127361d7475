//! Custom error types and handling
//!
//! This module defines the application's error types and implements
//! conversion to HTTP responses for the Axum framework. Each variant maps to
//! one corrective action on the admin side, so the codes are stable.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use uuid::Uuid;

use crate::models::StageStatus;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // Eligibility errors
    #[error("Not eligible: {0}")]
    NotEligible(String),

    #[error("Stage closed: {0}")]
    StageClosed(String),

    // Configuration errors
    #[error("No advancement quota configured for stage {0}")]
    NoQuotaConfigured(Uuid),

    // Conflict / staleness errors
    #[error("Ranking changed since the elimination plan was previewed; refresh and retry")]
    StalePlan,

    #[error("Season {0} has already been finalized")]
    AlreadyFinalized(Uuid),

    #[error("Cannot move stage from {from} to {to}")]
    InvalidTransition { from: StageStatus, to: StageStatus },

    #[error("Conflict: {0}")]
    Conflict(String),

    // Persistence errors
    #[error("Database error: {0}")]
    Database(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::NotEligible(_) => "NOT_ELIGIBLE",
            Self::StageClosed(_) => "STAGE_CLOSED",
            Self::NoQuotaConfigured(_) => "NO_QUOTA_CONFIGURED",
            Self::StalePlan => "RANKING_CHANGED",
            Self::AlreadyFinalized(_) => "ALREADY_FINALIZED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidToken | Self::TokenExpired | Self::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::NotEligible(_) | Self::StageClosed(_) | Self::NoQuotaConfigured(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::StalePlan
            | Self::AlreadyFinalized(_)
            | Self::InvalidTransition { .. }
            | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                self.to_string()
            }
            _ => self.to_string(),
        };

        let details = match &self {
            AppError::InvalidTransition { from, to } => Some(serde_json::json!({
                "from": from,
                "to": to,
            })),
            AppError::NoQuotaConfigured(stage_id) => {
                Some(serde_json::json!({ "stage_id": stage_id }))
            }
            AppError::AlreadyFinalized(season_id) => {
                Some(serde_json::json!({ "season_id": season_id }))
            }
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::Conflict(format!("Record already exists: {}", db_err.message()))
                } else {
                    AppError::Database(db_err.to_string())
                }
            }
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let stage_id = Uuid::new_v4();

        assert_eq!(
            AppError::Validation("elapsed_seconds must be positive".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotEligible("eliminated".into()).error_code(),
            "NOT_ELIGIBLE"
        );
        assert_eq!(
            AppError::NoQuotaConfigured(stage_id).error_code(),
            "NO_QUOTA_CONFIGURED"
        );
        assert_eq!(AppError::StalePlan.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::StalePlan.error_code(), "RANKING_CHANGED");
        assert_eq!(
            AppError::AlreadyFinalized(stage_id).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Database("connection reset".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transition_message_names_both_states() {
        let err = AppError::InvalidTransition {
            from: StageStatus::Upcoming,
            to: StageStatus::Completed,
        };
        assert_eq!(err.to_string(), "Cannot move stage from upcoming to completed");
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
    }
}
