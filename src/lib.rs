//! Reflex - Terminal Reaction-Time Game Library
//!
//! This module exposes the game logic for testing and external use.

pub mod achievements;
pub mod app;
pub mod build_info;
pub mod clock;
pub mod constants;
pub mod leaderboard;
pub mod persistence;
pub mod quests;
pub mod session;
pub mod stats;

// Terminal rendering; only the binary calls into this.
pub mod ui;

pub use app::App;
pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::{CELL_COUNT, GRID_SIZE, MAX_LIVES};
pub use session::{GamePhase, SessionEngine, SessionEvent, SessionSummary, StartError};
pub use stats::{LifetimeStats, PeriodicCounters};
