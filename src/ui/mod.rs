//! Terminal rendering. Consumes snapshots of the app state; never
//! mutates game logic.

mod grid;
mod panels;

use crate::app::App;
use crate::persistence::Store;
use crate::session::GamePhase;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

/// Which overlay is on top of the game scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Quests,
}

/// UI-only state owned by the event loop.
pub struct ViewState {
    pub overlay: Overlay,
    pub name_input: String,
    pub status_line: Option<String>,
}

impl ViewState {
    pub fn new(name_input: String) -> Self {
        Self {
            overlay: Overlay::None,
            name_input,
            status_line: None,
        }
    }
}

/// Keyboard labels for the grid cells, row by row.
pub const CELL_KEYS: [char; crate::constants::CELL_COUNT] = [
    '1', '2', '3', '4', 'q', 'w', 'e', 'r', 'a', 's', 'd', 'f', 'z', 'x', 'c', 'v',
];

/// Map a pressed key to its grid cell.
pub fn cell_for_key(key: char) -> Option<usize> {
    CELL_KEYS.iter().position(|&c| c == key.to_ascii_lowercase())
}

/// Top-level draw dispatch.
pub fn draw<S: Store>(frame: &mut Frame, app: &App<S>, view: &ViewState, now_ms: i64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // HUD
            Constraint::Min(10),    // Grid or end screen
            Constraint::Length(10), // Log / lifetime stats
        ])
        .split(frame.size());

    grid::draw_hud(frame, chunks[0], app, view);

    match app.phase() {
        GamePhase::GameOver => panels::draw_game_over(frame, chunks[1], app, now_ms),
        _ => grid::draw_grid(frame, chunks[1], app, now_ms),
    }

    panels::draw_log(frame, chunks[2], app);

    if view.overlay == Overlay::Quests {
        panels::draw_quests(frame, frame.size(), app);
    }
}
