//! Achievement types and unlock tracking.

use crate::stats::LifetimeStats;
use serde::{Deserialize, Serialize};

/// What an achievement measures. Together with its requirement this
/// uniquely identifies an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementKind {
    GamesPlayed,
    HighScore,
    Streak,
    Multiplier,
    PerfectGames,
    Level,
    SkillRating,
}

/// Identity of an achievement: kind plus the requirement value. The
/// multiplier requirement is stored in tenths so the key stays `Eq`/`Hash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AchievementId {
    pub kind: AchievementKind,
    pub requirement: u64,
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl AchievementDef {
    /// Whether the lifetime stats satisfy this achievement. Pure; the
    /// unlocked set is tracked separately.
    pub fn is_met(&self, stats: &LifetimeStats) -> bool {
        let req = self.id.requirement;
        match self.id.kind {
            AchievementKind::GamesPlayed => stats.games_played >= req,
            AchievementKind::HighScore => stats.highest_score as u64 >= req,
            AchievementKind::Streak => stats.longest_streak_ever as u64 >= req,
            AchievementKind::Multiplier => (stats.max_multiplier_seen * 10.0) as u64 >= req,
            AchievementKind::PerfectGames => stats.perfect_games >= req,
            AchievementKind::Level => stats.level as u64 >= req,
            AchievementKind::SkillRating => stats.skill_rating as u64 >= req,
        }
    }
}

/// Record of one unlock. Kept as a list rather than a map keyed by
/// [`AchievementId`] because the JSON blob format only allows string keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub id: AchievementId,
    pub unlocked_at_ms: i64,
}

/// The persisted unlocked set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Achievements {
    pub unlocked: Vec<UnlockedAchievement>,
}

impl Achievements {
    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.iter().any(|u| u.id == id)
    }

    pub fn unlock(&mut self, id: AchievementId, at_ms: i64) {
        if !self.is_unlocked(id) {
            self.unlocked.push(UnlockedAchievement { id, unlocked_at_ms: at_ms });
        }
    }

    pub fn unlocked_at(&self, id: AchievementId) -> Option<i64> {
        self.unlocked
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.unlocked_at_ms)
    }
}
