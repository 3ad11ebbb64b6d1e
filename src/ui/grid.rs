//! The play field: HUD bar and the 4x4 target grid.

use crate::app::App;
use crate::constants::GRID_SIZE;
use crate::persistence::Store;
use crate::session::GamePhase;
use crate::ui::{ViewState, CELL_KEYS};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Score, lives, multiplier, streak; refreshed after every event.
pub fn draw_hud<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>, view: &ViewState) {
    let state = &app.engine.state;
    let hearts = "♥".repeat(state.lives as usize)
        + &"♡".repeat((crate::constants::MAX_LIVES - state.lives) as usize);

    let line = Line::from(vec![
        Span::styled(
            format!(" Score {} ", state.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(hearts, Style::default().fg(Color::Red)),
        Span::raw(" | "),
        Span::styled(
            format!("x{:.1}", state.multiplier),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("streak {}", state.streak),
            Style::default().fg(Color::Green),
        ),
        Span::raw(" | "),
        Span::styled(format!("{} coins", app.coins), Style::default().fg(Color::Magenta)),
    ]);

    let title = match view.status_line.as_deref() {
        Some(status) => status.to_string(),
        None => format!("reflex | {}", player_label(app, view)),
    };

    let hud = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title(title))
        .alignment(Alignment::Center);
    frame.render_widget(hud, area);
}

fn player_label<S: Store>(app: &App<S>, view: &ViewState) -> String {
    if app.username.is_empty() {
        if view.name_input.is_empty() {
            "type a name, then Enter".to_string()
        } else {
            format!("name: {}_", view.name_input)
        }
    } else {
        app.username.clone()
    }
}

/// The 4x4 grid. The live target is highlighted, a waiting power-up shows
/// its icon, and a recent miss tints the border.
pub fn draw_grid<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>, now_ms: i64) {
    let state = &app.engine.state;

    let border_style = if state.is_shaking(now_ms) {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(grid_title(state));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, GRID_SIZE as u32); GRID_SIZE])
        .split(inner);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_SIZE as u32); GRID_SIZE])
            .split(*row_area);

        for (col_idx, cell_area) in cols.iter().enumerate() {
            let cell = row_idx * GRID_SIZE + col_idx;
            draw_cell(frame, *cell_area, app, cell);
        }
    }
}

fn grid_title(state: &crate::session::SessionState) -> String {
    match state.phase {
        GamePhase::Idle => "press Enter to start".to_string(),
        GamePhase::Countdown => format!("get ready... {}", state.countdown_remaining),
        GamePhase::Playing => format!("{}s", state.elapsed_seconds),
        GamePhase::GameOver => "game over".to_string(),
    }
}

fn draw_cell<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>, cell: usize) {
    let state = &app.engine.state;

    let is_target = state.phase == GamePhase::Playing && state.target == Some(cell);
    let powerup = state
        .pending_powerup
        .filter(|p| p.cell == cell)
        .map(|p| crate::session::powerups::def_for(p.kind));

    let (label, style) = if is_target {
        (
            "◉".to_string(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    } else if let Some(def) = powerup {
        (
            def.icon.to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )
    } else {
        (String::new(), Style::default().fg(Color::DarkGray))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{}", CELL_KEYS[cell]));
    let text = Paragraph::new(label)
        .style(style)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(text, area);
}
