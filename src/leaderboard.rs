//! Local leaderboard: a capped, score-ordered list of session records.
//!
//! Pure transformations only; the caller owns loading and storing the
//! entry list.

use crate::constants::LEADERBOARD_CAP;
use serde::{Deserialize, Serialize};

/// One recorded session. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    pub multiplier: f64,
    /// Epoch milliseconds at which the session ended.
    pub timestamp_ms: i64,
}

/// Time window a ranking is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Daily,
    Weekly,
    AllTime,
}

impl Window {
    fn cutoff_ms(&self, now_ms: i64) -> i64 {
        match self {
            Window::Daily => now_ms - 24 * 60 * 60 * 1000,
            Window::Weekly => now_ms - 7 * 24 * 60 * 60 * 1000,
            Window::AllTime => i64::MIN,
        }
    }
}

/// Insert a new entry, keeping the list sorted descending by score and
/// capped. The sort is stable, so equal scores keep insertion order; when
/// the cap is exceeded the lowest score (and among equals, the newest
/// arrival) is evicted.
pub fn record(entries: &mut Vec<LeaderboardEntry>, entry: LeaderboardEntry) {
    entries.push(entry);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_CAP);
}

/// Rank entries within a time window. Returns `(rank, entry)` pairs with
/// rank starting at 1; ties keep their insertion order from the stored
/// list.
pub fn rank<'a>(
    entries: &'a [LeaderboardEntry],
    window: Window,
    now_ms: i64,
) -> Vec<(usize, &'a LeaderboardEntry)> {
    let cutoff = window.cutoff_ms(now_ms);
    entries
        .iter()
        .filter(|e| e.timestamp_ms >= cutoff)
        .enumerate()
        .map(|(i, e)| (i + 1, e))
        .collect()
}
