//! Season handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Season routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{season_id}/finalize", post(handler::finalize_season))
        .route("/{season_id}/champions", get(handler::list_champions))
}
