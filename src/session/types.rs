//! Session-scoped state: everything that lives only while a round is active.

use crate::constants::{MAX_LIVES, MULTIPLIER_START};
use crate::session::powerups::{ActiveEffect, PowerUpSpawn};

/// Lifecycle phase of a game session.
///
/// Only `Playing` accepts scoring events; taps in any other phase are
/// silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Idle,
    Countdown,
    Playing,
    GameOver,
}

/// Per-session click accounting, folded into lifetime stats at session end.
#[derive(Debug, Clone, Default)]
pub struct ClickLog {
    pub hits: u32,
    pub misses: u32,
    /// Recorded on each hit, measured from the previous click of any
    /// kind (hit or miss); a hit with no prior click records 0.
    pub reaction_times_ms: Vec<u64>,
    /// Length of each streak at the moment it was broken.
    pub combo_history: Vec<u32>,
    pub last_click_at_ms: Option<i64>,
}

impl ClickLog {
    pub fn total_clicks(&self) -> u32 {
        self.hits + self.misses
    }
}

/// Transient state of the active round. Owned by the session engine,
/// discarded when a new session starts.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: GamePhase,
    pub username: String,
    pub score: u32,
    pub multiplier: f64,
    pub max_multiplier: f64,
    pub lives: u32,
    pub streak: u32,
    pub longest_streak: u32,
    /// The single live target cell, if any. Index into the flattened grid.
    pub target: Option<usize>,
    pub countdown_remaining: u32,
    pub elapsed_seconds: u64,
    pub clicks: ClickLog,
    /// Timed power-up effects currently applied, swept on a fixed interval.
    pub active_effects: Vec<ActiveEffect>,
    /// A spawned power-up waiting on the grid to be picked up. At most one.
    pub pending_powerup: Option<PowerUpSpawn>,
    /// Miss feedback for the UI; cleared by time, never scored.
    pub shake_until_ms: i64,
    pub started_at_ms: i64,
    pub ended: bool,
}

impl SessionState {
    pub fn new(username: String, now_ms: i64) -> Self {
        Self {
            phase: GamePhase::Idle,
            username,
            score: 0,
            multiplier: MULTIPLIER_START,
            max_multiplier: MULTIPLIER_START,
            lives: MAX_LIVES,
            streak: 0,
            longest_streak: 0,
            target: None,
            countdown_remaining: 0,
            elapsed_seconds: 0,
            clicks: ClickLog::default(),
            active_effects: Vec::new(),
            pending_powerup: None,
            shake_until_ms: 0,
            started_at_ms: now_ms,
            ended: false,
        }
    }

    /// Whether the miss-feedback shake is still showing at `now`.
    pub fn is_shaking(&self, now_ms: i64) -> bool {
        now_ms < self.shake_until_ms
    }
}

/// Everything the stats aggregator and leaderboard need from a finished
/// session. Produced exactly once per session by `end_session`.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub username: String,
    pub final_score: u32,
    pub duration_seconds: u64,
    pub hits: u32,
    pub misses: u32,
    pub total_clicks: u32,
    pub longest_streak: u32,
    pub highest_combo: u32,
    pub combo_history: Vec<u32>,
    pub reaction_times_ms: Vec<u64>,
    pub max_multiplier: f64,
    pub lives_remaining: u32,
    pub max_lives: u32,
}

impl SessionSummary {
    /// Best (lowest) reaction time recorded this session, ignoring the
    /// zero placeholder of the first click.
    pub fn best_reaction_time_ms(&self) -> Option<u64> {
        self.reaction_times_ms.iter().copied().filter(|&t| t > 0).min()
    }

    /// No life lost all session.
    pub fn is_perfect(&self) -> bool {
        self.lives_remaining == self.max_lives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_state_defaults() {
        let state = SessionState::new("Player".to_string(), 5000);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.multiplier, 1.0);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.streak, 0);
        assert!(state.target.is_none());
        assert!(state.active_effects.is_empty());
        assert!(state.pending_powerup.is_none());
        assert_eq!(state.started_at_ms, 5000);
        assert!(!state.ended);
    }

    #[test]
    fn test_shake_clears_by_time() {
        let mut state = SessionState::new("P".to_string(), 0);
        state.shake_until_ms = 1500;
        assert!(state.is_shaking(1000));
        assert!(!state.is_shaking(1500));
        assert!(!state.is_shaking(2000));
    }

    #[test]
    fn test_best_reaction_time_skips_first_click_zero() {
        let summary = SessionSummary {
            username: "P".to_string(),
            final_score: 30,
            duration_seconds: 10,
            hits: 3,
            misses: 0,
            total_clicks: 3,
            longest_streak: 3,
            highest_combo: 3,
            combo_history: vec![3],
            reaction_times_ms: vec![0, 420, 380],
            max_multiplier: 1.2,
            lives_remaining: 5,
            max_lives: 5,
        };
        assert_eq!(summary.best_reaction_time_ms(), Some(380));
        assert!(summary.is_perfect());
    }

    #[test]
    fn test_best_reaction_time_none_when_empty() {
        let summary = SessionSummary {
            username: "P".to_string(),
            final_score: 0,
            duration_seconds: 1,
            hits: 0,
            misses: 0,
            total_clicks: 0,
            longest_streak: 0,
            highest_combo: 0,
            combo_history: vec![],
            reaction_times_ms: vec![],
            max_multiplier: 1.0,
            lives_remaining: 5,
            max_lives: 5,
        };
        assert_eq!(summary.best_reaction_time_ms(), None);
    }
}
