use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use reflex::app::App;
use reflex::clock::{Clock, SystemClock};
use reflex::persistence::{FileStore, Store};
use reflex::quests::PeriodKind;
use reflex::session::GamePhase;
use reflex::ui::{self, Overlay, ViewState};
use std::io;
use std::time::Duration;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "reflex {} ({})",
                    reflex::build_info::BUILD_DATE,
                    reflex::build_info::BUILD_COMMIT
                );
                return Ok(());
            }
            "--help" | "-h" => {
                println!("Reflex - Terminal Reaction-Time Game\n");
                println!("Usage: reflex\n");
                println!("In game:");
                println!("  1-4/q-r/a-f/z-v  tap a grid cell");
                println!("  Enter            start a game");
                println!("  u                open the quest panel");
                println!("  Esc              quit");
                return Ok(());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'reflex --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let store = FileStore::open()?;
    let mut app = App::load(store);
    let mut view = ViewState::new(String::new());

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &mut view);

    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    result
}

fn run<S: Store>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
    view: &mut ViewState,
) -> io::Result<()> {
    let clock = SystemClock;
    let mut rng = rand::thread_rng();

    loop {
        let now = clock.now_ms();
        app.advance(now, &mut rng);
        terminal.draw(|frame| ui::draw(frame, app, view, now))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let now = clock.now_ms();

        // Ctrl-C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            app.abandon_session(now);
            return Ok(());
        }

        if view.overlay == Overlay::Quests {
            handle_quest_key(app, view, key.code, now);
            continue;
        }

        match key.code {
            KeyCode::Esc => {
                app.abandon_session(now);
                return Ok(());
            }
            KeyCode::Enter => {
                let name = if app.username.is_empty() {
                    view.name_input.clone()
                } else {
                    app.username.clone()
                };
                match app.start_game(&name, now) {
                    Ok(()) => view.status_line = None,
                    Err(e) => view.status_line = Some(e.to_string()),
                }
            }
            KeyCode::Char('u') if app.phase() != GamePhase::Playing => {
                app.open_quests(&mut rng);
                view.overlay = Overlay::Quests;
            }
            KeyCode::Backspace if app.username.is_empty() => {
                view.name_input.pop();
            }
            KeyCode::Char(c) => {
                if app.phase() == GamePhase::Playing {
                    if let Some(cell) = ui::cell_for_key(c) {
                        app.handle_tap(cell, now, &mut rng);
                    }
                } else if app.username.is_empty() && (c.is_alphanumeric() || c == '_') {
                    view.name_input.push(c);
                }
            }
            _ => {}
        }
    }
}

fn handle_quest_key<S: Store>(app: &mut App<S>, view: &mut ViewState, code: KeyCode, now: i64) {
    match code {
        KeyCode::Esc | KeyCode::Char('u') => {
            app.close_quests();
            view.overlay = Overlay::None;
        }
        KeyCode::Char('d') => {
            view.status_line = Some(match app.claim_quests(PeriodKind::Daily, now) {
                Ok(outcome) => format!("Daily claimed: +{} coins", outcome.coins_awarded),
                Err(e) => e.to_string(),
            });
        }
        KeyCode::Char('w') => {
            view.status_line = Some(match app.claim_quests(PeriodKind::Weekly, now) {
                Ok(outcome) => format!("Weekly claimed: +{} coins", outcome.coins_awarded),
                Err(e) => e.to_string(),
            });
        }
        _ => {}
    }
}
