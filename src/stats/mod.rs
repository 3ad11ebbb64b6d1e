//! Lifetime statistics and the session-fold aggregator.

pub mod aggregate;
pub mod types;

pub use aggregate::{apply, level_from_experience, skill_rating, xp_for_session};
pub use types::{LifetimeStats, PeriodicCounters};
