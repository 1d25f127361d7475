//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod health;
pub mod seasons;
pub mod stages;

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    constants::REQUEST_TIMEOUT_SECONDS,
    middleware::{admin_middleware, logging_middleware},
    state::AppState,
};

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    let admin = Router::new()
        .nest("/stages", stages::routes())
        .nest("/seasons", seasons::routes())
        .route_layer(middleware::from_fn_with_state(state, admin_middleware));

    Router::new().merge(health::routes()).merge(admin)
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes(state.clone()))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECONDS)))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
