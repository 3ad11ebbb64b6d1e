//! Folding a finished session into lifetime statistics.
//!
//! `apply` is a pure function of (prior stats, summary, now); it reads no
//! globals and cannot fail, so the caller always gets a usable record even
//! when the stored blob was corrupt and the baseline was substituted.

use crate::constants::XP_PER_LEVEL_UNIT;
use crate::session::SessionSummary;
use crate::stats::types::LifetimeStats;

/// XP awarded for one session. Non-negative by construction; a perfect
/// game (no life lost) doubles the award.
pub fn xp_for_session(summary: &SessionSummary) -> u64 {
    let base = (summary.final_score as u64) / 10
        + summary.hits as u64
        + 2 * summary.longest_streak as u64;
    if summary.is_perfect() {
        base * 2
    } else {
        base
    }
}

/// Level implied by a cumulative experience total:
/// `floor(sqrt(xp / 100)) + 1`.
pub fn level_from_experience(experience: u64) -> u32 {
    ((experience / XP_PER_LEVEL_UNIT) as f64).sqrt() as u32 + 1
}

/// Composite skill rating over already-aggregated fields. Recomputed in
/// full on every update; each term is clamped to [0, 1000] before
/// weighting.
pub fn skill_rating(stats: &LifetimeStats) -> u32 {
    let accuracy_term = stats.accuracy * 1000.0 * 0.3;
    let score_term = stats.average_score.min(1000.0) * 0.3;
    let streak_term = ((stats.longest_streak_ever as f64) * 10.0).min(1000.0) * 0.2;
    let reaction_term = (1000.0 - stats.average_reaction_time_ms).max(0.0) * 0.2;
    (accuracy_term + score_term + streak_term + reaction_term) as u32
}

/// Mean of the measurable reaction times in a session. The first click's
/// zero placeholder is excluded; an empty list yields `None` so it cannot
/// poison the running average.
fn session_mean_reaction_ms(summary: &SessionSummary) -> Option<f64> {
    let measurable: Vec<u64> = summary
        .reaction_times_ms
        .iter()
        .copied()
        .filter(|&t| t > 0)
        .collect();
    if measurable.is_empty() {
        return None;
    }
    Some(measurable.iter().sum::<u64>() as f64 / measurable.len() as f64)
}

/// Fold one session summary into the lifetime record.
pub fn apply(prior: &LifetimeStats, summary: &SessionSummary, now_ms: i64) -> LifetimeStats {
    let mut stats = prior.clone();
    let games_before = stats.games_played;
    stats.games_played += 1;

    stats.total_score += summary.final_score as u64;
    stats.average_score = stats.total_score as f64 / stats.games_played as f64;
    stats.highest_score = stats.highest_score.max(summary.final_score);
    stats.total_play_time_seconds += summary.duration_seconds;
    stats.last_played_ms = now_ms;

    // Zero clicks means zero accuracy, never NaN.
    let session_accuracy = if summary.total_clicks == 0 {
        0.0
    } else {
        summary.hits as f64 / summary.total_clicks as f64
    };
    stats.accuracy = (stats.accuracy * games_before as f64 + session_accuracy)
        / stats.games_played as f64;

    if let Some(best) = summary.best_reaction_time_ms() {
        stats.best_reaction_time_ms = Some(match stats.best_reaction_time_ms {
            Some(existing) => existing.min(best),
            None => best,
        });
    }
    if let Some(mean) = session_mean_reaction_ms(summary) {
        let sessions_before = stats.reaction_sessions;
        stats.reaction_sessions += 1;
        stats.average_reaction_time_ms = (stats.average_reaction_time_ms
            * sessions_before as f64
            + mean)
            / stats.reaction_sessions as f64;
    }

    stats.max_multiplier_seen = stats.max_multiplier_seen.max(summary.max_multiplier);
    if summary.is_perfect() {
        stats.perfect_games += 1;
    }

    stats.longest_streak_ever = stats.longest_streak_ever.max(summary.longest_streak);
    stats.highest_combo_ever = stats.highest_combo_ever.max(summary.highest_combo);
    stats.average_combo = (stats.average_combo * games_before as f64
        + summary.highest_combo as f64)
        / stats.games_played as f64;

    // Level is computed from the accumulated total BEFORE any reset; a
    // level-up then spends the whole pool. When one award crosses several
    // thresholds the player still jumps straight to the implied level and
    // experience resets once.
    stats.experience += xp_for_session(summary);
    let implied = level_from_experience(stats.experience);
    if implied > stats.level {
        stats.level = implied;
        stats.experience = 0;
    }

    stats.skill_rating = skill_rating(&stats);
    stats
}
