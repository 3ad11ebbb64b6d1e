// Grid geometry
pub const GRID_SIZE: usize = 4;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

// Session timing
pub const COUNTDOWN_TICKS: u32 = 3;
pub const COUNTDOWN_TICK_MS: u64 = 1000;
pub const PLAY_TICK_MS: u64 = 1000;
pub const EFFECT_SWEEP_MS: u64 = 100;
pub const SHAKE_DURATION_MS: u64 = 500;

// Scoring
pub const MAX_LIVES: u32 = 5;
pub const BASE_POINTS: f64 = 10.0;
pub const MULTIPLIER_START: f64 = 1.0;
pub const MULTIPLIER_STEP: f64 = 0.1;
pub const MULTIPLIER_CAP: f64 = 3.0;

// Leaderboard
pub const LEADERBOARD_CAP: usize = 100;

// Progression
pub const XP_PER_LEVEL_UNIT: u64 = 100;

// Save system constants
pub const SAVE_VERSION_MAGIC: u64 = 0x5245464C45580000; // "REFLEX\0\0" in hex
