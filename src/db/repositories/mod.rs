//! Database repositories
//!
//! Repositories handle all direct PostgreSQL interactions. Each function runs
//! on the connection of the caller's transaction.

pub mod champion_repo;
pub mod performance_repo;
pub mod roster_repo;
pub mod season_repo;

pub use champion_repo::ChampionRepository;
pub use performance_repo::PerformanceRepository;
pub use roster_repo::RosterRepository;
pub use season_repo::SeasonRepository;
