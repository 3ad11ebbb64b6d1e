//! Integration test: lifetime stats folding across multiple sessions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reflex::app::App;
use reflex::persistence::MemStore;
use reflex::session::GamePhase;
use reflex::stats::{apply, LifetimeStats};
use reflex::{FixedClock, CELL_COUNT, MAX_LIVES};

fn new_app() -> App<MemStore> {
    App::load(MemStore::new())
}

/// Play one session with the given number of hits, then lose all lives.
fn play_session(
    app: &mut App<MemStore>,
    clock: &mut FixedClock,
    rng: &mut ChaCha8Rng,
    hits: u32,
) {
    app.start_game("Ada", clock.now_ms).unwrap();
    clock.advance(3_000);
    app.advance(clock.now_ms, rng);
    assert_eq!(app.phase(), GamePhase::Playing);

    for _ in 0..hits {
        clock.advance(200);
        let target = app.engine.state.target.unwrap();
        app.handle_tap(target, clock.now_ms, rng);
    }
    for _ in 0..MAX_LIVES {
        clock.advance(200);
        let wrong = match app.engine.state.target {
            Some(t) => (t + 1) % CELL_COUNT,
            None => 0,
        };
        app.handle_tap(wrong, clock.now_ms, rng);
    }
    assert_eq!(app.phase(), GamePhase::GameOver);
}

#[test]
fn test_average_score_across_two_sessions() {
    let mut app = new_app();
    let mut clock = FixedClock::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    // First session: 10 hits from multiplier 1.0 score
    // 10+11+12+13+14+15+16+17+18+19 = 145.
    play_session(&mut app, &mut clock, &mut rng, 10);
    assert_eq!(app.stats.games_played, 1);
    assert_eq!(app.stats.average_score, 145.0);
    assert_eq!(app.stats.highest_score, 145);

    // Second session: 1 hit, score 10. Average (145 + 10) / 2.
    clock.advance(5_000);
    play_session(&mut app, &mut clock, &mut rng, 1);
    assert_eq!(app.stats.games_played, 2);
    assert_eq!(app.stats.average_score, 77.5);
    assert_eq!(app.stats.highest_score, 145);
    assert_eq!(app.stats.total_score, 155);
}

#[test]
fn test_accuracy_and_streak_aggregation() {
    let mut app = new_app();
    let mut clock = FixedClock::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    // 10 hits then 5 misses: accuracy 10/15.
    play_session(&mut app, &mut clock, &mut rng, 10);
    assert!((app.stats.accuracy - 10.0 / 15.0).abs() < 1e-9);
    assert_eq!(app.stats.longest_streak_ever, 10);
    assert_eq!(app.stats.highest_combo_ever, 10);
    // No perfect game: all lives were lost.
    assert_eq!(app.stats.perfect_games, 0);
    assert!(app.stats.best_reaction_time_ms.is_some());
}

#[test]
fn test_experience_and_level_progress() {
    let mut app = new_app();
    let mut clock = FixedClock::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    assert_eq!(app.stats.level, 1);
    // Score 145, 10 hits, streak 10: 14 + 10 + 20 = 44 XP. Below the
    // level-2 threshold of 100, so experience accumulates.
    play_session(&mut app, &mut clock, &mut rng, 10);
    assert_eq!(app.stats.level, 1);
    assert_eq!(app.stats.experience, 44);

    // Two more identical sessions: 132 total crosses the threshold, the
    // level-up spends the whole pool.
    clock.advance(5_000);
    play_session(&mut app, &mut clock, &mut rng, 10);
    clock.advance(5_000);
    play_session(&mut app, &mut clock, &mut rng, 10);
    assert_eq!(app.stats.level, 2);
    assert_eq!(app.stats.experience, 0);
}

#[test]
fn test_skill_rating_updates_after_each_session() {
    let mut app = new_app();
    let mut clock = FixedClock::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    assert_eq!(app.stats.skill_rating, 0);
    play_session(&mut app, &mut clock, &mut rng, 10);
    let first = app.stats.skill_rating;
    assert!(first > 0);

    // A terrible session (no hits) drags accuracy and the rating down.
    clock.advance(5_000);
    play_session(&mut app, &mut clock, &mut rng, 0);
    assert!(app.stats.skill_rating < first);
}

#[test]
fn test_stats_persist_across_reload() {
    let mut clock = FixedClock::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut app = new_app();
    play_session(&mut app, &mut clock, &mut rng, 10);
    let snapshot = app.stats.clone();

    let reloaded = App::load(app.store);
    assert_eq!(reloaded.stats.games_played, snapshot.games_played);
    assert_eq!(reloaded.stats.total_score, snapshot.total_score);
    assert_eq!(reloaded.stats.skill_rating, snapshot.skill_rating);
    assert_eq!(reloaded.stats.experience, snapshot.experience);
}

#[test]
fn test_corrupt_stats_blob_degrades_to_baseline() {
    use reflex::persistence::{keys, Store};

    let mut store = MemStore::new();
    store.set(keys::STATS, serde_json::json!([1, 2, 3]));
    let app = App::load(store);
    assert_eq!(app.stats.games_played, 0);
    assert_eq!(app.stats.level, 1);
}

#[test]
fn test_pure_apply_has_no_side_channel() {
    // Folding the same summary into the same prior twice gives identical
    // results: apply reads nothing but its arguments.
    let mut app = new_app();
    let mut clock = FixedClock::new(0);
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    play_session(&mut app, &mut clock, &mut rng, 3);
    let summary = app.last_summary.clone().unwrap();

    let prior = LifetimeStats::baseline();
    let a = apply(&prior, &summary, 99);
    let b = apply(&prior, &summary, 99);
    assert_eq!(a.games_played, b.games_played);
    assert_eq!(a.skill_rating, b.skill_rating);
    assert_eq!(a.accuracy, b.accuracy);
    assert_eq!(a.experience, b.experience);
}
