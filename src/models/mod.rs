//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod champion;
pub mod participant;
pub mod performance;
pub mod season;
pub mod stage;

pub use champion::*;
pub use participant::*;
pub use performance::*;
pub use season::*;
pub use stage::*;
