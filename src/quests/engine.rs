//! Quest evaluation and single-claim-per-period enforcement.

use crate::quests::types::{
    counter_value, reset_counter, ClaimTimes, PeriodKind, QuestDefinition, QuestView,
};
use crate::stats::PeriodicCounters;
use chrono::{TimeZone, Utc};
use std::fmt;

const WEEK_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Why a claim was refused. Both cases are informational, not failures;
/// nothing is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimError {
    /// The period of the last claim has not rolled over yet.
    TooEarly,
    /// The period is open but no quest in the view is completable.
    NothingToClaim,
}

impl fmt::Display for ClaimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimError::TooEarly => write!(f, "already claimed this period"),
            ClaimError::NothingToClaim => write!(f, "no completed quests to claim"),
        }
    }
}

impl std::error::Error for ClaimError {}

/// Progress of one displayed quest against the live counters.
#[derive(Debug, Clone, Copy)]
pub struct QuestStatus {
    pub quest: QuestDefinition,
    /// `min(counter, threshold)`; shown progress never overshoots.
    pub progress: f64,
    pub completable: bool,
}

/// What a successful claim paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub coins_awarded: u64,
    pub quests_claimed: u32,
}

/// Whether a new claim window has opened since `last_claim_ms`.
///
/// Daily rolls over on the UTC calendar day, weekly after seven full
/// days. An unset last claim means the window is open.
pub fn period_elapsed(period: PeriodKind, last_claim_ms: Option<i64>, now_ms: i64) -> bool {
    let last = match last_claim_ms {
        Some(ms) => ms,
        None => return true,
    };
    match period {
        PeriodKind::Daily => {
            let last_day = Utc.timestamp_millis_opt(last).single().map(|t| t.date_naive());
            let today = Utc.timestamp_millis_opt(now_ms).single().map(|t| t.date_naive());
            match (last_day, today) {
                (Some(a), Some(b)) => a != b,
                // Unrepresentable timestamps only come from a tampered
                // blob; treat the window as open rather than wedge claims.
                _ => true,
            }
        }
        PeriodKind::Weekly => (now_ms - last) / WEEK_MS >= 1,
    }
}

/// Evaluate every quest in the view against the live counters.
pub fn evaluate(view: &QuestView, counters: &PeriodicCounters) -> Vec<QuestStatus> {
    view.quests
        .iter()
        .map(|&quest| {
            let counter = counter_value(counters, view.period, quest.kind);
            QuestStatus {
                quest,
                progress: counter.min(quest.tier.threshold),
                completable: counter >= quest.tier.threshold,
            }
        })
        .collect()
}

/// Claim every completable quest in the view.
///
/// Rejections leave counters and claim times untouched. A successful
/// claim pays all completable quests, zeroes their counters, and stamps
/// the period. Everything is computed up front and applied without any
/// fallible step in between, so it can never half-apply.
pub fn claim(
    view: &QuestView,
    counters: &mut PeriodicCounters,
    claims: &mut ClaimTimes,
    now_ms: i64,
) -> Result<ClaimOutcome, ClaimError> {
    if !period_elapsed(view.period, claims.get(view.period), now_ms) {
        return Err(ClaimError::TooEarly);
    }

    let completable: Vec<QuestDefinition> = evaluate(view, counters)
        .into_iter()
        .filter(|s| s.completable)
        .map(|s| s.quest)
        .collect();
    if completable.is_empty() {
        return Err(ClaimError::NothingToClaim);
    }

    let mut coins = 0u64;
    for quest in &completable {
        coins += quest.tier.reward_coins as u64;
        reset_counter(counters, view.period, quest.kind);
    }
    claims.set(view.period, now_ms);

    Ok(ClaimOutcome {
        coins_awarded: coins,
        quests_claimed: completable.len() as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::types::{QuestKind, QuestTier};

    fn view_with(period: PeriodKind, tiers: [(QuestKind, f64, u32); 3]) -> QuestView {
        QuestView {
            period,
            quests: tiers
                .iter()
                .map(|&(kind, threshold, reward_coins)| QuestDefinition {
                    kind,
                    tier: QuestTier { threshold, reward_coins },
                })
                .collect(),
        }
    }

    fn daily_view() -> QuestView {
        view_with(
            PeriodKind::Daily,
            [
                (QuestKind::GamesPlayed, 3.0, 20),
                (QuestKind::ScoreSingle, 100.0, 25),
                (QuestKind::Multiplier, 1.5, 20),
            ],
        )
    }

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    #[test]
    fn test_period_elapsed_when_never_claimed() {
        assert!(period_elapsed(PeriodKind::Daily, None, 0));
        assert!(period_elapsed(PeriodKind::Weekly, None, 0));
    }

    #[test]
    fn test_daily_period_follows_calendar_day() {
        // 2024-01-15 23:30 UTC and 40 minutes later (next calendar day).
        let late_evening = 1_705_361_400_000;
        let past_midnight = late_evening + 40 * 60 * 1000;
        assert!(!period_elapsed(
            PeriodKind::Daily,
            Some(late_evening),
            late_evening + 5 * 60 * 1000
        ));
        assert!(period_elapsed(
            PeriodKind::Daily,
            Some(late_evening),
            past_midnight
        ));
    }

    #[test]
    fn test_weekly_period_needs_seven_full_days() {
        let claimed = 1_700_000_000_000;
        assert!(!period_elapsed(
            PeriodKind::Weekly,
            Some(claimed),
            claimed + 6 * DAY_MS + 23 * 60 * 60 * 1000
        ));
        assert!(period_elapsed(
            PeriodKind::Weekly,
            Some(claimed),
            claimed + 7 * DAY_MS
        ));
    }

    #[test]
    fn test_evaluate_clamps_progress_to_threshold() {
        let mut counters = PeriodicCounters::default();
        counters.daily_games_played = 7;
        counters.daily_high_score = 40;
        counters.daily_highest_multiplier = 1.2;

        let statuses = evaluate(&daily_view(), &counters);
        assert_eq!(statuses[0].progress, 3.0);
        assert!(statuses[0].completable);
        assert_eq!(statuses[1].progress, 40.0);
        assert!(!statuses[1].completable);
        assert_eq!(statuses[2].progress, 1.2);
        assert!(!statuses[2].completable);
    }

    #[test]
    fn test_claim_pays_completable_and_resets_their_counters() {
        let mut counters = PeriodicCounters::default();
        counters.daily_games_played = 5;
        counters.daily_high_score = 150;
        counters.daily_highest_multiplier = 1.2; // not completable
        counters.weekly_games_played = 5;
        let mut claims = ClaimTimes::default();

        let outcome = claim(&daily_view(), &mut counters, &mut claims, 1_000).unwrap();
        assert_eq!(outcome, ClaimOutcome { coins_awarded: 45, quests_claimed: 2 });

        assert_eq!(counters.daily_games_played, 0);
        assert_eq!(counters.daily_high_score, 0);
        // The incomplete quest's counter survives.
        assert_eq!(counters.daily_highest_multiplier, 1.2);
        // Weekly counters are a different period entirely.
        assert_eq!(counters.weekly_games_played, 5);
        assert_eq!(claims.get(PeriodKind::Daily), Some(1_000));
    }

    #[test]
    fn test_second_claim_same_day_rejected_without_mutation() {
        let mut counters = PeriodicCounters::default();
        counters.daily_games_played = 5;
        let mut claims = ClaimTimes::default();

        let noon = 1_705_320_000_000;
        claim(&daily_view(), &mut counters, &mut claims, noon).unwrap();

        // Grind more games the same day, then try again.
        counters.daily_games_played = 4;
        let err = claim(&daily_view(), &mut counters, &mut claims, noon + 60_000);
        assert_eq!(err, Err(ClaimError::TooEarly));
        assert_eq!(counters.daily_games_played, 4);
        assert_eq!(claims.get(PeriodKind::Daily), Some(noon));
    }

    #[test]
    fn test_claim_next_day_allowed() {
        let mut counters = PeriodicCounters::default();
        counters.daily_games_played = 5;
        let mut claims = ClaimTimes::default();

        let noon = 1_705_320_000_000;
        claim(&daily_view(), &mut counters, &mut claims, noon).unwrap();

        counters.daily_games_played = 3;
        let outcome = claim(&daily_view(), &mut counters, &mut claims, noon + DAY_MS);
        assert!(outcome.is_ok());
    }

    #[test]
    fn test_claim_with_nothing_completable_keeps_window_open() {
        let mut counters = PeriodicCounters::default();
        counters.daily_games_played = 1;
        let mut claims = ClaimTimes::default();

        let err = claim(&daily_view(), &mut counters, &mut claims, 500);
        assert_eq!(err, Err(ClaimError::NothingToClaim));
        assert_eq!(claims.get(PeriodKind::Daily), None);

        // Finishing the quest later the same day still allows a claim.
        counters.daily_games_played = 3;
        assert!(claim(&daily_view(), &mut counters, &mut claims, 900).is_ok());
    }

    #[test]
    fn test_daily_and_weekly_claims_are_independent() {
        let mut counters = PeriodicCounters::default();
        counters.daily_games_played = 3;
        counters.weekly_games_played = 15;
        let mut claims = ClaimTimes::default();

        let weekly_view = view_with(
            PeriodKind::Weekly,
            [
                (QuestKind::GamesPlayed, 15.0, 120),
                (QuestKind::ScoreSingle, 300.0, 150),
                (QuestKind::Multiplier, 2.0, 130),
            ],
        );

        claim(&daily_view(), &mut counters, &mut claims, 1_000).unwrap();
        let outcome = claim(&weekly_view, &mut counters, &mut claims, 2_000).unwrap();
        assert_eq!(outcome.coins_awarded, 120);
        assert_eq!(counters.weekly_games_played, 0);
        assert_eq!(claims.get(PeriodKind::Weekly), Some(2_000));
    }
}
