//! Business logic services

pub mod champion_service;
pub mod elimination_service;
pub mod performance_service;
pub mod stage_service;

pub use champion_service::ChampionService;
pub use elimination_service::{EliminationOutcome, EliminationService};
pub use performance_service::PerformanceService;
pub use stage_service::StageService;
