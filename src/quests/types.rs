//! Quest definitions, tier ladders, and the rolled quest view.

use crate::stats::PeriodicCounters;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The periodic windows quests are claimed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodKind {
    Daily,
    Weekly,
}

impl PeriodKind {
    pub fn name(&self) -> &'static str {
        match self {
            PeriodKind::Daily => "Daily",
            PeriodKind::Weekly => "Weekly",
        }
    }
}

/// What a quest measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestKind {
    /// Sessions finished this period.
    GamesPlayed,
    /// Best single-session score this period.
    ScoreSingle,
    /// Highest multiplier reached this period.
    Multiplier,
}

impl QuestKind {
    pub const ALL: [QuestKind; 3] = [
        QuestKind::GamesPlayed,
        QuestKind::ScoreSingle,
        QuestKind::Multiplier,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            QuestKind::GamesPlayed => "Play games",
            QuestKind::ScoreSingle => "Reach a score",
            QuestKind::Multiplier => "Reach a multiplier",
        }
    }
}

/// One rung of a tier ladder.
#[derive(Debug, Clone, Copy)]
pub struct QuestTier {
    pub threshold: f64,
    pub reward_coins: u32,
}

const DAILY_GAMES: &[QuestTier] = &[
    QuestTier { threshold: 3.0, reward_coins: 20 },
    QuestTier { threshold: 5.0, reward_coins: 40 },
    QuestTier { threshold: 10.0, reward_coins: 80 },
];
const DAILY_SCORE: &[QuestTier] = &[
    QuestTier { threshold: 100.0, reward_coins: 25 },
    QuestTier { threshold: 250.0, reward_coins: 50 },
    QuestTier { threshold: 500.0, reward_coins: 100 },
];
const DAILY_MULTIPLIER: &[QuestTier] = &[
    QuestTier { threshold: 1.5, reward_coins: 20 },
    QuestTier { threshold: 2.0, reward_coins: 45 },
    QuestTier { threshold: 2.5, reward_coins: 90 },
];
const WEEKLY_GAMES: &[QuestTier] = &[
    QuestTier { threshold: 15.0, reward_coins: 120 },
    QuestTier { threshold: 30.0, reward_coins: 250 },
    QuestTier { threshold: 60.0, reward_coins: 500 },
];
const WEEKLY_SCORE: &[QuestTier] = &[
    QuestTier { threshold: 300.0, reward_coins: 150 },
    QuestTier { threshold: 600.0, reward_coins: 300 },
    QuestTier { threshold: 1_000.0, reward_coins: 600 },
];
const WEEKLY_MULTIPLIER: &[QuestTier] = &[
    QuestTier { threshold: 2.0, reward_coins: 130 },
    QuestTier { threshold: 2.5, reward_coins: 260 },
    QuestTier { threshold: 3.0, reward_coins: 520 },
];

/// The fixed, ordered tier ladder for a quest.
pub fn tiers_for(period: PeriodKind, kind: QuestKind) -> &'static [QuestTier] {
    match (period, kind) {
        (PeriodKind::Daily, QuestKind::GamesPlayed) => DAILY_GAMES,
        (PeriodKind::Daily, QuestKind::ScoreSingle) => DAILY_SCORE,
        (PeriodKind::Daily, QuestKind::Multiplier) => DAILY_MULTIPLIER,
        (PeriodKind::Weekly, QuestKind::GamesPlayed) => WEEKLY_GAMES,
        (PeriodKind::Weekly, QuestKind::ScoreSingle) => WEEKLY_SCORE,
        (PeriodKind::Weekly, QuestKind::Multiplier) => WEEKLY_MULTIPLIER,
    }
}

/// A quest as shown to the player: one kind at one rolled tier.
#[derive(Debug, Clone, Copy)]
pub struct QuestDefinition {
    pub kind: QuestKind,
    pub tier: QuestTier,
}

/// The quests currently on screen for one period. Rolled fresh every time
/// the panel opens and never persisted; the player's progress against
/// whatever tier is shown comes live from the counters.
#[derive(Debug, Clone)]
pub struct QuestView {
    pub period: PeriodKind,
    pub quests: Vec<QuestDefinition>,
}

impl QuestView {
    /// Roll one tier per quest kind, uniformly over the ladder.
    pub fn roll(period: PeriodKind, rng: &mut impl Rng) -> Self {
        let quests = QuestKind::ALL
            .iter()
            .map(|&kind| {
                let ladder = tiers_for(period, kind);
                QuestDefinition {
                    kind,
                    tier: ladder[rng.gen_range(0..ladder.len())],
                }
            })
            .collect();
        Self { period, quests }
    }
}

/// The counter a quest reads, for the view's period.
pub fn counter_value(counters: &PeriodicCounters, period: PeriodKind, kind: QuestKind) -> f64 {
    match (period, kind) {
        (PeriodKind::Daily, QuestKind::GamesPlayed) => counters.daily_games_played as f64,
        (PeriodKind::Daily, QuestKind::ScoreSingle) => counters.daily_high_score as f64,
        (PeriodKind::Daily, QuestKind::Multiplier) => counters.daily_highest_multiplier,
        (PeriodKind::Weekly, QuestKind::GamesPlayed) => counters.weekly_games_played as f64,
        (PeriodKind::Weekly, QuestKind::ScoreSingle) => counters.weekly_high_score as f64,
        (PeriodKind::Weekly, QuestKind::Multiplier) => counters.weekly_highest_multiplier,
    }
}

/// Zero the counter behind a claimed quest.
pub fn reset_counter(counters: &mut PeriodicCounters, period: PeriodKind, kind: QuestKind) {
    match (period, kind) {
        (PeriodKind::Daily, QuestKind::GamesPlayed) => counters.daily_games_played = 0,
        (PeriodKind::Daily, QuestKind::ScoreSingle) => counters.daily_high_score = 0,
        (PeriodKind::Daily, QuestKind::Multiplier) => counters.daily_highest_multiplier = 0.0,
        (PeriodKind::Weekly, QuestKind::GamesPlayed) => counters.weekly_games_played = 0,
        (PeriodKind::Weekly, QuestKind::ScoreSingle) => counters.weekly_high_score = 0,
        (PeriodKind::Weekly, QuestKind::Multiplier) => counters.weekly_highest_multiplier = 0.0,
    }
}

/// Last successful claim per period, stored as epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClaimTimes {
    #[serde(default)]
    pub daily_ms: Option<i64>,
    #[serde(default)]
    pub weekly_ms: Option<i64>,
}

impl ClaimTimes {
    pub fn get(&self, period: PeriodKind) -> Option<i64> {
        match period {
            PeriodKind::Daily => self.daily_ms,
            PeriodKind::Weekly => self.weekly_ms,
        }
    }

    pub fn set(&mut self, period: PeriodKind, at_ms: i64) {
        match period {
            PeriodKind::Daily => self.daily_ms = Some(at_ms),
            PeriodKind::Weekly => self.weekly_ms = Some(at_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tier_ladders_are_ordered() {
        for period in [PeriodKind::Daily, PeriodKind::Weekly] {
            for kind in QuestKind::ALL {
                let ladder = tiers_for(period, kind);
                assert!(!ladder.is_empty());
                for pair in ladder.windows(2) {
                    assert!(pair[0].threshold < pair[1].threshold);
                    assert!(pair[0].reward_coins < pair[1].reward_coins);
                }
            }
        }
    }

    #[test]
    fn test_roll_covers_one_quest_per_kind() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let view = QuestView::roll(PeriodKind::Daily, &mut rng);
        assert_eq!(view.quests.len(), QuestKind::ALL.len());
        for (quest, kind) in view.quests.iter().zip(QuestKind::ALL) {
            assert_eq!(quest.kind, kind);
            assert!(tiers_for(PeriodKind::Daily, kind)
                .iter()
                .any(|t| t.threshold == quest.tier.threshold));
        }
    }

    #[test]
    fn test_rolls_vary_between_openings() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let view = QuestView::roll(PeriodKind::Weekly, &mut rng);
            seen.insert(view.quests[0].tier.reward_coins);
        }
        // All three tiers of the first weekly quest should come up.
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_counter_round_trip() {
        let mut counters = PeriodicCounters::default();
        counters.record(420, 2.2);
        assert_eq!(
            counter_value(&counters, PeriodKind::Daily, QuestKind::ScoreSingle),
            420.0
        );
        reset_counter(&mut counters, PeriodKind::Daily, QuestKind::ScoreSingle);
        assert_eq!(
            counter_value(&counters, PeriodKind::Daily, QuestKind::ScoreSingle),
            0.0
        );
        // The weekly counterpart is untouched.
        assert_eq!(
            counter_value(&counters, PeriodKind::Weekly, QuestKind::ScoreSingle),
            420.0
        );
    }

    #[test]
    fn test_claim_times_serialize() {
        let mut times = ClaimTimes::default();
        times.set(PeriodKind::Daily, 1_700_000_000_000);
        let json = serde_json::to_string(&times).unwrap();
        let loaded: ClaimTimes = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.get(PeriodKind::Daily), Some(1_700_000_000_000));
        assert_eq!(loaded.get(PeriodKind::Weekly), None);
    }
}
