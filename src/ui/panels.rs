//! Secondary panels: event log, game-over screen, quest overlay.

use crate::app::App;
use crate::leaderboard::{self, Window};
use crate::persistence::Store;
use crate::quests::PeriodKind;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Recent events, newest first.
pub fn draw_log<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let lines: Vec<Line> = app
        .notifications
        .iter()
        .map(|n| Line::from(n.as_str()))
        .collect();
    let log = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Log"));
    frame.render_widget(log, area);
}

/// Session summary, lifetime stats, and the top of the leaderboard.
pub fn draw_game_over<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>, now_ms: i64) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut lines = vec![Line::from(Span::styled(
        "GAME OVER",
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))];
    if let Some(summary) = &app.last_summary {
        lines.push(Line::from(format!("Final score: {}", summary.final_score)));
        lines.push(Line::from(format!(
            "Accuracy: {}/{} clicks",
            summary.hits, summary.total_clicks
        )));
        lines.push(Line::from(format!("Longest streak: {}", summary.longest_streak)));
        lines.push(Line::from(format!(
            "Max multiplier: x{:.1}",
            summary.max_multiplier
        )));
        lines.push(Line::from(format!("Duration: {}s", summary.duration_seconds)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Level {} | Skill {} | Best {}",
        app.stats.level, app.stats.skill_rating, app.stats.highest_score
    )));
    lines.push(Line::from(format!(
        "Games {} | Perfect {} | Avg {:.0}",
        app.stats.games_played, app.stats.perfect_games, app.stats.average_score
    )));
    lines.push(Line::from(""));
    lines.push(Line::from("Enter: play again | u: quests | Esc: quit"));

    let left = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .alignment(Alignment::Center);
    frame.render_widget(left, chunks[0]);

    let ranked = leaderboard::rank(&app.leaderboard, Window::AllTime, now_ms);
    let mut board_lines = Vec::new();
    for (rank, entry) in ranked.iter().take(10) {
        board_lines.push(Line::from(format!(
            "{:>2}. {:<12} {:>6}  x{:.1}",
            rank, entry.username, entry.score, entry.multiplier
        )));
    }
    let right = Paragraph::new(board_lines)
        .block(Block::default().borders(Borders::ALL).title("Leaderboard"));
    frame.render_widget(right, chunks[1]);
}

/// Centered quest overlay with both periods and their claim state.
pub fn draw_quests<S: Store>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    for period in [PeriodKind::Daily, PeriodKind::Weekly] {
        lines.push(Line::from(Span::styled(
            format!("{} Quests", period.name()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for status in app.quest_statuses(period) {
            let quest = status.quest;
            let marker = if status.completable { "✔" } else { " " };
            let style = if status.completable {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!(
                    " {} {}  {:.1}/{:.1}  ({} coins)",
                    marker,
                    quest.kind.name(),
                    status.progress,
                    quest.tier.threshold,
                    quest.tier.reward_coins
                ),
                style,
            )));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from("d: claim daily | w: claim weekly | u/Esc: close"));

    let panel = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Quests"));
    frame.render_widget(panel, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
