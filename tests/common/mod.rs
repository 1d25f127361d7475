//! Shared fixtures for integration tests
//!
//! Seeds an in-memory store with one active season. Participants are named
//! by small integers so assertions stay readable.

#![allow(dead_code)]

pub mod recording;

use std::sync::Arc;

use gauntlet::{
    AppState,
    config::{Config, DatabaseConfig, JwtConfig, LogFormat, ServerConfig},
    db::MemoryStore,
    models::{PerformanceRecord, Season, Stage, StageStatus},
    services::PerformanceService,
};
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

pub const A: u128 = 1;
pub const B: u128 = 2;
pub const C: u128 = 3;
pub const D: u128 = 4;
pub const E: u128 = 5;

/// Participant id for a fixture number
pub fn participant(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn participants(ns: &[u128]) -> Vec<Uuid> {
    ns.iter().copied().map(participant).collect()
}

pub struct Fixture {
    pub store: MemoryStore,
    pub season: Season,
}

impl Fixture {
    pub async fn new() -> Self {
        let store = MemoryStore::new();
        let season = store.create_season("Open Season", 2026).await;
        Self { store, season }
    }

    /// Fixture with participants already admitted
    pub async fn with_roster(ns: &[u128]) -> Self {
        let fixture = Self::new().await;
        for n in ns {
            fixture.admit(*n).await;
        }
        fixture
    }

    pub async fn admit(&self, n: u128) -> Uuid {
        let id = participant(n);
        self.store
            .admit(self.season.id, id)
            .await
            .expect("failed to admit participant");
        id
    }

    pub async fn stage(&self, order: i32, quota: Option<i32>, status: StageStatus) -> Stage {
        self.store
            .create_stage(
                self.season.id,
                &format!("Round {}", order),
                order,
                quota,
                status,
            )
            .await
            .expect("failed to create stage")
    }

    pub async fn record(&self, stage: &Stage, n: u128, elapsed_seconds: i64) -> PerformanceRecord {
        PerformanceService::record_result(&self.store, stage.id, participant(n), elapsed_seconds)
            .await
            .expect("failed to record result")
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(Arc::new(self.store.clone()), test_config())
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            log_format: LogFormat::Pretty,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
    }
}
