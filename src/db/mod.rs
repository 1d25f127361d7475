//! Database module
//!
//! The storage port, its PostgreSQL and in-memory adapters, and migrations.

pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod store;

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{config::DatabaseConfig, constants::DATABASE_ACQUIRE_TIMEOUT_SECONDS};

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Store, StoreTx};

/// Open the engine's pool and check that the database answers
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(DATABASE_ACQUIRE_TIMEOUT_SECONDS))
        .connect(&config.url)
        .await?;

    let _: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
