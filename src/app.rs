//! Application orchestration: wires the session engine to stats, quests,
//! the leaderboard, achievements, and the store.
//!
//! The post-session pipeline always runs in the same order (aggregate
//! stats, append the leaderboard entry, bump periodic counters, diff
//! achievements, persist), and every write happens inside the transition
//! that caused it.

use crate::achievements::{self, Achievements};
use crate::leaderboard::{self, LeaderboardEntry};
use crate::persistence::{keys, load_or, save, Store};
use crate::quests::{
    self, ClaimError, ClaimOutcome, ClaimTimes, PeriodKind, QuestStatus, QuestView,
};
use crate::session::{GamePhase, SessionEngine, SessionEvent, SessionSummary, StartError};
use crate::stats::{self, LifetimeStats, PeriodicCounters};
use rand::Rng;
use std::collections::VecDeque;

/// Max number of notification lines kept for the UI.
const MAX_NOTIFICATIONS: usize = 8;

pub struct App<S: Store> {
    pub engine: SessionEngine,
    pub store: S,
    pub username: String,
    pub stats: LifetimeStats,
    pub counters: PeriodicCounters,
    pub claims: ClaimTimes,
    pub achievements: Achievements,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub coins: u64,
    /// Rolled fresh each time the quest panel opens; never persisted.
    pub quest_views: Option<[QuestView; 2]>,
    /// Recent event lines for the UI, newest first.
    pub notifications: VecDeque<String>,
    /// Summary of the most recently finished session, for the game-over
    /// screen.
    pub last_summary: Option<SessionSummary>,
}

impl<S: Store> App<S> {
    /// Load all persisted blobs, substituting defaults for anything
    /// missing or corrupt.
    pub fn load(store: S) -> Self {
        let username: String = load_or(&store, keys::IDENTITY, String::new());
        let stats = load_or(&store, keys::STATS, LifetimeStats::baseline());
        let counters = load_or(&store, keys::COUNTERS, PeriodicCounters::default());
        let claims = load_or(&store, keys::QUEST_CLAIMS, ClaimTimes::default());
        let achievements = load_or(&store, keys::ACHIEVEMENTS, Achievements::default());
        let leaderboard = load_or(&store, keys::LEADERBOARD, Vec::new());
        let coins = load_or(&store, keys::WALLET, 0u64);

        Self {
            engine: SessionEngine::new(),
            store,
            username,
            stats,
            counters,
            claims,
            achievements,
            leaderboard,
            coins,
            quest_views: None,
            notifications: VecDeque::new(),
            last_summary: None,
        }
    }

    /// Start a session under the given identity. On success the identity
    /// is remembered for the next launch.
    pub fn start_game(&mut self, username: &str, now_ms: i64) -> Result<(), StartError> {
        self.engine.start(username, now_ms)?;
        self.username = username.trim().to_string();
        save(&mut self.store, keys::IDENTITY, &self.username);
        self.last_summary = None;
        Ok(())
    }

    /// Forward a grid tap, then finish the session if the tap ended it.
    pub fn handle_tap(&mut self, cell: usize, now_ms: i64, rng: &mut impl Rng) {
        let events = self.engine.tap(cell, now_ms, rng);
        self.note_events(&events);
        if events
            .iter()
            .any(|e| matches!(e, SessionEvent::GameOver { .. }))
        {
            self.finish_session(now_ms);
        }
    }

    /// Fire due timers.
    pub fn advance(&mut self, now_ms: i64, rng: &mut impl Rng) {
        let events = self.engine.advance(now_ms, rng);
        self.note_events(&events);
    }

    /// Abandon the current session early (quit to menu). Stats still
    /// count the partial game.
    pub fn abandon_session(&mut self, now_ms: i64) {
        self.finish_session(now_ms);
    }

    /// The fixed post-session pipeline. Idempotent because the engine
    /// yields a summary only once.
    fn finish_session(&mut self, now_ms: i64) {
        let summary = match self.engine.end_session(now_ms) {
            Some(s) => s,
            None => return,
        };

        // 1. Lifetime stats.
        self.stats = stats::apply(&self.stats, &summary, now_ms);

        // 2. Leaderboard.
        leaderboard::record(
            &mut self.leaderboard,
            LeaderboardEntry {
                username: summary.username.clone(),
                score: summary.final_score,
                multiplier: summary.max_multiplier,
                timestamp_ms: now_ms,
            },
        );

        // 3. Periodic quest counters.
        self.counters
            .record(summary.final_score, summary.max_multiplier);

        // 4. Achievements.
        for def in achievements::check_unlocks(&self.stats, &mut self.achievements, now_ms) {
            self.push_note(format!("{} Achievement unlocked: {}", def.icon, def.name));
        }

        // 5. Persist everything the pipeline touched.
        save(&mut self.store, keys::STATS, &self.stats);
        save(&mut self.store, keys::LEADERBOARD, &self.leaderboard);
        save(&mut self.store, keys::COUNTERS, &self.counters);
        save(&mut self.store, keys::ACHIEVEMENTS, &self.achievements);

        self.last_summary = Some(summary);
    }

    /// Roll fresh quest tiers for both periods. Re-rolling on every open
    /// is deliberate: the shown tier may regress to a harder one.
    pub fn open_quests(&mut self, rng: &mut impl Rng) {
        self.quest_views = Some([
            QuestView::roll(PeriodKind::Daily, rng),
            QuestView::roll(PeriodKind::Weekly, rng),
        ]);
    }

    pub fn close_quests(&mut self) {
        self.quest_views = None;
    }

    /// Progress of the currently shown quests against the live counters.
    pub fn quest_statuses(&self, period: PeriodKind) -> Vec<QuestStatus> {
        match self.view_for(period) {
            Some(view) => quests::evaluate(view, &self.counters),
            None => Vec::new(),
        }
    }

    /// Claim the shown quests for one period.
    pub fn claim_quests(&mut self, period: PeriodKind, now_ms: i64) -> Result<ClaimOutcome, ClaimError> {
        let view = match self.view_for(period) {
            Some(v) => v.clone(),
            None => return Err(ClaimError::NothingToClaim),
        };
        let outcome = quests::claim(&view, &mut self.counters, &mut self.claims, now_ms)?;
        self.coins += outcome.coins_awarded;

        save(&mut self.store, keys::COUNTERS, &self.counters);
        save(&mut self.store, keys::QUEST_CLAIMS, &self.claims);
        save(&mut self.store, keys::WALLET, &self.coins);

        self.push_note(format!(
            "{} quests claimed: +{} coins",
            period.name(),
            outcome.coins_awarded
        ));
        Ok(outcome)
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.state.phase
    }

    fn view_for(&self, period: PeriodKind) -> Option<&QuestView> {
        self.quest_views
            .as_ref()
            .and_then(|views| views.iter().find(|v| v.period == period))
    }

    fn note_events(&mut self, events: &[SessionEvent]) {
        for event in events {
            let line = match event {
                SessionEvent::CountdownTick { remaining } => format!("Starting in {remaining}..."),
                SessionEvent::PlayStarted => "Go!".to_string(),
                SessionEvent::Hit { points, streak, .. } => {
                    format!("+{points} ({streak} streak)")
                }
                SessionEvent::Miss { lives_remaining, .. } => {
                    format!("Miss! {lives_remaining} lives left")
                }
                SessionEvent::ShieldAbsorbed { .. } => "Shield absorbed the miss".to_string(),
                SessionEvent::PowerUpSpawned { kind, .. } => {
                    format!("{} appeared", crate::session::powerups::def_for(*kind).name)
                }
                SessionEvent::PowerUpPickedUp { kind } => {
                    format!("{} active", crate::session::powerups::def_for(*kind).name)
                }
                SessionEvent::PowerUpExpired { kind } => {
                    format!("{} wore off", crate::session::powerups::def_for(*kind).name)
                }
                SessionEvent::GameOver { final_score } => {
                    format!("Game over! Final score {final_score}")
                }
            };
            self.push_note(line);
        }
    }

    fn push_note(&mut self, line: String) {
        if self.notifications.len() >= MAX_NOTIFICATIONS {
            self.notifications.pop_back();
        }
        self.notifications.push_front(line);
    }
}
