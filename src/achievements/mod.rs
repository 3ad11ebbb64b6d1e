//! Achievements: a fixed catalog of predicates over lifetime stats.
//!
//! Unlocks are derived by diffing newly met predicates against the stored
//! unlocked set after each stats update.

pub mod data;
pub mod types;

pub use data::ALL_ACHIEVEMENTS;
pub use types::{AchievementDef, AchievementId, AchievementKind, Achievements};

use crate::stats::LifetimeStats;

/// Compare the catalog against the unlocked set, recording and returning
/// anything newly met so the caller can show a notification.
pub fn check_unlocks(
    stats: &LifetimeStats,
    achievements: &mut Achievements,
    now_ms: i64,
) -> Vec<&'static AchievementDef> {
    let mut newly = Vec::new();
    for def in ALL_ACHIEVEMENTS {
        if !achievements.is_unlocked(def.id) && def.is_met(stats) {
            achievements.unlock(def.id, now_ms);
            newly.push(def);
        }
    }
    newly
}
