//! HTTP middleware

pub mod auth;
pub mod logging;

pub use auth::{AuthenticatedAdmin, admin_middleware};
pub use logging::logging_middleware;
