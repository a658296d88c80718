use crossterm::event::{self, Event, KeyEventKind};
use grammar_garden::{
    draw_celebration, draw_exercise, draw_menu, draw_quit_confirmation, logger, App, AppConfig,
    AppState, QuestionBank, TerminalGuard,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    if let Some(path) = &config.log_path {
        logger::init(path);
    }

    // Fail before touching the terminal so the error stays readable.
    let bank = match &config.bank_path {
        Some(path) => QuestionBank::load(path),
        None => QuestionBank::builtin(),
    };
    let bank = match bank {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Could not load question bank: {}", e);
            logger::log(&format!("Bank load failed: {}", e));
            return Err(e.into());
        }
    };
    logger::log(&format!("Starting with config {:?}", config));
    match &config.bank_path {
        Some(path) => logger::log(&format!("Loaded question bank from {}", path.display())),
        None => logger::log("Loaded built-in question bank"),
    }

    // Dropped on every exit path below, including `?` returns.
    let mut guard = TerminalGuard::enter(io::stdout())?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(bank, config.shuffle);
    let result = run(&mut terminal, &mut app, &config);
    guard.restore();

    if let Err(e) = &result {
        logger::log(&format!("Exited with error: {}", e));
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| {
            match app.state {
                AppState::Menu => draw_menu(f, &app.progress, app.selected_section),
                AppState::Exercise => {
                    if let Some(session) = app.session.as_mut() {
                        draw_exercise(f, session, &app.progress);
                    }
                }
                AppState::QuitConfirm => draw_quit_confirmation(f, &app.progress),
            }
            draw_celebration(f, &app.celebration);
        })?;

        if event::poll(config.tick_rate)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }
        app.tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}
