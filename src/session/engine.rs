//! The session engine: phase transitions, scoring, and timer scheduling.
//!
//! Timers are deadline fields, not OS timers. The caller's event loop
//! calls [`SessionEngine::advance`] with the current wall-clock time and
//! the engine fires whatever ticks are due: the 1 s countdown tick while
//! in `Countdown`, the 1 s play tick while `Playing`, and the 100 ms
//! effect sweep whenever effects are active. Leaving a phase clears its
//! deadline, so a superseded session can never be mutated by a stale
//! timer.

use crate::constants::{
    BASE_POINTS, CELL_COUNT, COUNTDOWN_TICKS, COUNTDOWN_TICK_MS, EFFECT_SWEEP_MS, MAX_LIVES,
    MULTIPLIER_CAP, MULTIPLIER_START, MULTIPLIER_STEP, PLAY_TICK_MS, SHAKE_DURATION_MS,
};
use crate::session::powerups::{
    self, ActiveEffect, PowerUpKind, PowerUpSpawn,
};
use crate::session::types::{GamePhase, SessionState, SessionSummary};
use rand::Rng;
use std::fmt;

/// Starting a session requires an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    IdentityRequired,
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartError::IdentityRequired => write!(f, "enter a username before starting"),
        }
    }
}

impl std::error::Error for StartError {}

/// What happened during an engine call. The presentation layer maps these
/// to log lines and visual effects; game logic never touches UI types.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    CountdownTick { remaining: u32 },
    PlayStarted,
    Hit { cell: usize, points: u32, streak: u32 },
    Miss { cell: usize, lives_remaining: u32 },
    ShieldAbsorbed { cell: usize },
    PowerUpSpawned { kind: PowerUpKind, cell: usize },
    PowerUpPickedUp { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    GameOver { final_score: u32 },
}

/// Owns the one active session and its timer deadlines.
pub struct SessionEngine {
    pub state: SessionState,
    next_countdown_at: Option<i64>,
    next_play_tick_at: Option<i64>,
    next_sweep_at: Option<i64>,
}

impl SessionEngine {
    pub fn new() -> Self {
        Self {
            state: SessionState::new(String::new(), 0),
            next_countdown_at: None,
            next_play_tick_at: None,
            next_sweep_at: None,
        }
    }

    /// Begin a new session, discarding any prior one along with its
    /// timers. An empty or whitespace identity is rejected without
    /// touching state.
    pub fn start(&mut self, username: &str, now_ms: i64) -> Result<(), StartError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StartError::IdentityRequired);
        }

        self.state = SessionState::new(username.to_string(), now_ms);
        self.state.phase = GamePhase::Countdown;
        self.state.countdown_remaining = COUNTDOWN_TICKS;
        self.next_countdown_at = Some(now_ms + COUNTDOWN_TICK_MS as i64);
        self.next_play_tick_at = None;
        self.next_sweep_at = None;
        Ok(())
    }

    /// Fire every tick that is due at `now_ms`. Called once per event-loop
    /// iteration.
    pub fn advance(&mut self, now_ms: i64, rng: &mut impl Rng) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.advance_countdown(now_ms, rng, &mut events);
        self.advance_play(now_ms, rng, &mut events);
        self.advance_sweep(now_ms, &mut events);
        events
    }

    fn advance_countdown(
        &mut self,
        now_ms: i64,
        rng: &mut impl Rng,
        events: &mut Vec<SessionEvent>,
    ) {
        while self.state.phase == GamePhase::Countdown {
            let due = match self.next_countdown_at {
                Some(t) if now_ms >= t => t,
                _ => break,
            };
            self.state.countdown_remaining -= 1;
            if self.state.countdown_remaining == 0 {
                self.state.phase = GamePhase::Playing;
                self.state.target = Some(rng.gen_range(0..CELL_COUNT));
                self.next_countdown_at = None;
                self.next_play_tick_at = Some(due + self.play_tick_interval_ms());
                events.push(SessionEvent::PlayStarted);
            } else {
                self.next_countdown_at = Some(due + COUNTDOWN_TICK_MS as i64);
                events.push(SessionEvent::CountdownTick {
                    remaining: self.state.countdown_remaining,
                });
            }
        }
    }

    fn advance_play(&mut self, now_ms: i64, rng: &mut impl Rng, events: &mut Vec<SessionEvent>) {
        while self.state.phase == GamePhase::Playing {
            let due = match self.next_play_tick_at {
                Some(t) if now_ms >= t => t,
                _ => break,
            };
            self.state.elapsed_seconds += 1;

            if self.state.pending_powerup.is_none() {
                if let Some(kind) = powerups::roll_spawn(rng) {
                    let cell = self.random_free_cell(rng);
                    self.state.pending_powerup = Some(PowerUpSpawn { kind, cell });
                    events.push(SessionEvent::PowerUpSpawned { kind, cell });
                }
            }

            self.next_play_tick_at = Some(due + self.play_tick_interval_ms());
        }
    }

    fn advance_sweep(&mut self, now_ms: i64, events: &mut Vec<SessionEvent>) {
        if self.state.active_effects.is_empty() {
            self.next_sweep_at = None;
            return;
        }
        if self.next_sweep_at.is_none() {
            self.next_sweep_at = Some(now_ms + EFFECT_SWEEP_MS as i64);
        }
        while let Some(due) = self.next_sweep_at {
            if now_ms < due {
                break;
            }
            for kind in powerups::sweep_expired(&mut self.state.active_effects, due) {
                events.push(SessionEvent::PowerUpExpired { kind });
            }
            self.next_sweep_at = if self.state.active_effects.is_empty() {
                None
            } else {
                Some(due + EFFECT_SWEEP_MS as i64)
            };
        }
    }

    /// Handle a tap on a grid cell. Taps outside the `Playing` phase are
    /// silently ignored.
    pub fn tap(&mut self, cell: usize, now_ms: i64, rng: &mut impl Rng) -> Vec<SessionEvent> {
        if self.state.phase != GamePhase::Playing || cell >= CELL_COUNT {
            return Vec::new();
        }

        if let Some(spawn) = self.state.pending_powerup {
            if spawn.cell == cell {
                return self.pick_up(spawn.kind, now_ms);
            }
        }

        if self.state.target == Some(cell) {
            self.on_hit(cell, now_ms, rng)
        } else {
            self.on_miss(cell, now_ms)
        }
    }

    fn on_hit(&mut self, cell: usize, now_ms: i64, rng: &mut impl Rng) -> Vec<SessionEvent> {
        let points = self.points_for_hit();
        self.state.score += points;
        self.state.multiplier =
            (self.state.multiplier + MULTIPLIER_STEP).min(MULTIPLIER_CAP);
        self.state.max_multiplier = self.state.max_multiplier.max(self.state.multiplier);
        self.state.streak += 1;
        self.state.longest_streak = self.state.longest_streak.max(self.state.streak);

        let reaction = match self.state.clicks.last_click_at_ms {
            Some(prev) => (now_ms - prev).max(0) as u64,
            None => 0,
        };
        self.state.clicks.reaction_times_ms.push(reaction);
        self.state.clicks.last_click_at_ms = Some(now_ms);
        self.state.clicks.hits += 1;

        // A repeat of the same cell is allowed.
        self.state.target = Some(rng.gen_range(0..CELL_COUNT));

        vec![SessionEvent::Hit {
            cell,
            points,
            streak: self.state.streak,
        }]
    }

    fn on_miss(&mut self, cell: usize, now_ms: i64) -> Vec<SessionEvent> {
        self.state.clicks.misses += 1;
        // A miss is still a click: the next hit's reaction time is
        // measured from it.
        self.state.clicks.last_click_at_ms = Some(now_ms);

        if powerups::consume_effect(&mut self.state.active_effects, PowerUpKind::Shield) {
            return vec![SessionEvent::ShieldAbsorbed { cell }];
        }

        self.state.lives = self.state.lives.saturating_sub(1);
        self.state.multiplier = MULTIPLIER_START;
        if self.state.streak > 0 {
            self.state.clicks.combo_history.push(self.state.streak);
        }
        self.state.streak = 0;
        self.state.shake_until_ms = now_ms + SHAKE_DURATION_MS as i64;

        let mut events = vec![SessionEvent::Miss {
            cell,
            lives_remaining: self.state.lives,
        }];

        if self.state.lives == 0 {
            // Same synchronous step as the fatal miss, and only once:
            // the phase change makes further taps no-ops.
            self.state.phase = GamePhase::GameOver;
            self.state.target = None;
            self.state.active_effects.clear();
            self.cancel_timers();
            events.push(SessionEvent::GameOver {
                final_score: self.state.score,
            });
        }
        events
    }

    fn pick_up(&mut self, kind: PowerUpKind, now_ms: i64) -> Vec<SessionEvent> {
        self.state.pending_powerup = None;
        let mut events = vec![SessionEvent::PowerUpPickedUp { kind }];

        match kind {
            PowerUpKind::ExtraLife => {
                self.state.lives = (self.state.lives + 1).min(MAX_LIVES);
            }
            PowerUpKind::TimeSlow | PowerUpKind::DoubleMultiplier | PowerUpKind::Shield => {
                let ends_at_ms = powerups::def_for(kind)
                    .duration_ms
                    .map(|d| now_ms + d as i64);
                self.state.active_effects.push(ActiveEffect { kind, ends_at_ms });
                if self.next_sweep_at.is_none() {
                    self.next_sweep_at = Some(now_ms + EFFECT_SWEEP_MS as i64);
                }
            }
        }
        events
    }

    /// Finish the session and produce its summary. Idempotent: only the
    /// first call yields a summary, so stats are folded and the
    /// leaderboard appended at most once per session.
    pub fn end_session(&mut self, now_ms: i64) -> Option<SessionSummary> {
        if self.state.ended || self.state.phase == GamePhase::Idle {
            return None;
        }
        self.state.ended = true;
        self.state.phase = GamePhase::GameOver;
        self.state.target = None;
        // Effects die with the session so the sweep cannot surface
        // expiries after game over.
        self.state.active_effects.clear();
        self.cancel_timers();

        let mut combo_history = self.state.clicks.combo_history.clone();
        if self.state.streak > 0 {
            combo_history.push(self.state.streak);
        }
        let highest_combo = combo_history.iter().copied().max().unwrap_or(0);
        let duration_seconds =
            ((now_ms - self.state.started_at_ms).max(0) as u64) / 1000;

        Some(SessionSummary {
            username: self.state.username.clone(),
            final_score: self.state.score,
            duration_seconds,
            hits: self.state.clicks.hits,
            misses: self.state.clicks.misses,
            total_clicks: self.state.clicks.total_clicks(),
            longest_streak: self.state.longest_streak,
            highest_combo,
            combo_history,
            reaction_times_ms: self.state.clicks.reaction_times_ms.clone(),
            max_multiplier: self.state.max_multiplier,
            lives_remaining: self.state.lives,
            max_lives: MAX_LIVES,
        })
    }

    /// Points for a hit at the current multiplier. DoubleMultiplier
    /// doubles the factor used for scoring but not the stored multiplier.
    fn points_for_hit(&self) -> u32 {
        let mut factor = self.state.multiplier;
        if powerups::effect_active(&self.state.active_effects, PowerUpKind::DoubleMultiplier) {
            factor *= 2.0;
        }
        (BASE_POINTS * factor).round() as u32
    }

    /// Effective play-tick interval, halved while TimeSlow is active.
    fn play_tick_interval_ms(&self) -> i64 {
        if powerups::effect_active(&self.state.active_effects, PowerUpKind::TimeSlow) {
            (PLAY_TICK_MS / 2) as i64
        } else {
            PLAY_TICK_MS as i64
        }
    }

    fn random_free_cell(&self, rng: &mut impl Rng) -> usize {
        // Avoid dropping a power-up on the live target.
        loop {
            let cell = rng.gen_range(0..CELL_COUNT);
            if self.state.target != Some(cell) {
                return cell;
            }
        }
    }

    fn cancel_timers(&mut self) {
        self.next_countdown_at = None;
        self.next_play_tick_at = None;
        self.next_sweep_at = None;
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new()
    }
}
