//! Gauntlet - Stage Performance & Elimination Engine
//!
//! This library provides the core of a multi-stage competition season:
//! timed results are ranked per stage, the field is cut down to each
//! stage's advancement quota, and the terminal stage's ranking becomes the
//! season's permanent champion standings.
//!
//! # Features
//!
//! - Standard competition ranking (`1, 2, 2, 4`) recomputed on every result
//! - Two-phase eliminations guarded by a ranking fingerprint
//! - One-shot season finalization
//! - Admin-only JSON API over PostgreSQL, or an in-memory store
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic, one store transaction per operation
//! - **Engine**: Pure ranking, elimination and standings algorithms
//! - **Store / Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
