//! Stage performance and elimination engine
//!
//! Pure functions only: nothing in here touches the store. Services feed
//! records in and persist whatever comes out inside one transaction.

pub mod elimination;
pub mod finalizer;
pub mod ranking;

pub use elimination::{EliminationPlan, plan_eliminations};
pub use finalizer::{Standing, build_standings};
pub use ranking::{RankedEntry, has_ties, rank, stored_ranking};
