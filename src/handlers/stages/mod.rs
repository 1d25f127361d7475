//! Stage handlers: results, ranking and eliminations

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Stage routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{stage_id}/ranking", get(handler::get_ranking))
        .route("/{stage_id}/status", post(handler::transition_stage))
        // Results
        .route(
            "/{stage_id}/results/{participant_id}",
            put(handler::record_result),
        )
        .route(
            "/{stage_id}/results/{participant_id}/points",
            put(handler::award_points),
        )
        // Eliminations
        .route(
            "/{stage_id}/elimination-plan",
            get(handler::plan_eliminations),
        )
        .route("/{stage_id}/eliminations", post(handler::apply_elimination))
}
