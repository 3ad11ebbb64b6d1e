//! Persistent player statistics.

use serde::{Deserialize, Serialize};

/// Lifetime statistics, created on first launch and folded forward after
/// every session. Old or partial blobs deserialize with field defaults so
/// a save from an earlier version never fails to load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LifetimeStats {
    // Basic
    #[serde(default)]
    pub games_played: u64,
    #[serde(default)]
    pub total_score: u64,
    #[serde(default)]
    pub highest_score: u32,
    #[serde(default)]
    pub average_score: f64,
    #[serde(default)]
    pub total_play_time_seconds: u64,
    #[serde(default)]
    pub last_played_ms: i64,

    // Performance
    /// Running weighted average of per-session accuracy, in [0, 1].
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub best_reaction_time_ms: Option<u64>,
    /// Running average of per-session mean reaction times, over sessions
    /// that recorded at least one measurable reaction.
    #[serde(default)]
    pub average_reaction_time_ms: f64,
    #[serde(default)]
    pub reaction_sessions: u64,
    #[serde(default)]
    pub max_multiplier_seen: f64,
    #[serde(default)]
    pub perfect_games: u64,

    // Session-derived
    #[serde(default)]
    pub longest_streak_ever: u32,
    #[serde(default)]
    pub highest_combo_ever: u32,
    #[serde(default)]
    pub average_combo: f64,

    // Progress
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub skill_rating: u32,
}

impl LifetimeStats {
    /// The documented zero baseline used whenever the stored blob is
    /// absent or unreadable. Level starts at 1; everything else at zero.
    pub fn baseline() -> Self {
        Self {
            level: 1,
            ..Self::default()
        }
    }
}

/// Progress counters that reset only when their quest period is claimed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PeriodicCounters {
    #[serde(default)]
    pub daily_games_played: u32,
    #[serde(default)]
    pub daily_high_score: u32,
    #[serde(default)]
    pub daily_highest_multiplier: f64,
    #[serde(default)]
    pub weekly_games_played: u32,
    #[serde(default)]
    pub weekly_high_score: u32,
    #[serde(default)]
    pub weekly_highest_multiplier: f64,
}

impl PeriodicCounters {
    /// Bump both period windows from a finished session.
    pub fn record(&mut self, final_score: u32, max_multiplier: f64) {
        self.daily_games_played += 1;
        self.daily_high_score = self.daily_high_score.max(final_score);
        self.daily_highest_multiplier = self.daily_highest_multiplier.max(max_multiplier);
        self.weekly_games_played += 1;
        self.weekly_high_score = self.weekly_high_score.max(final_score);
        self.weekly_highest_multiplier = self.weekly_highest_multiplier.max(max_multiplier);
    }
}
