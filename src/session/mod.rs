//! The session engine and everything scoped to a single round.

pub mod engine;
pub mod powerups;
pub mod types;

pub use engine::{SessionEngine, SessionEvent, StartError};
pub use powerups::{PowerUpKind, POWER_UPS};
pub use types::{GamePhase, SessionState, SessionSummary};
