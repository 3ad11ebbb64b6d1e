//! Periodic quests: tiered objectives claimed once per day or week.

pub mod engine;
pub mod types;

pub use engine::{claim, evaluate, period_elapsed, ClaimError, ClaimOutcome, QuestStatus};
pub use types::{ClaimTimes, PeriodKind, QuestDefinition, QuestKind, QuestView};
