//! BLOCKFALL - falling blocks in the terminal

use anyhow::Context;
use blockfall::game::GameLogic;
use blockfall::input::{Command, InputHandler};
use blockfall::randomizer::UniformSource;
use blockfall::settings::Settings;
use blockfall::ui;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Get the directory for log files, creating it if needed
fn log_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let dir = log_dir();
    let log_file = format!("{}.log", std::process::id());

    // The terminal belongs to the UI, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&dir, &log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("blockfall=info"));
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(log = %dir.join(&log_file).display(), "BLOCKFALL starting up");
    guard
}

/// Load settings, writing a default file on first run
fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => {
            if Settings::settings_path().is_some_and(|path| !path.exists()) {
                match settings.save() {
                    Ok(path) => tracing::info!(path = %path.display(), "wrote default settings"),
                    Err(e) => tracing::warn!("Could not save default settings: {}", e),
                }
            }
            settings
        }
        Err(e) => {
            tracing::warn!("Falling back to default settings: {}", e);
            Settings::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let _guard = init_tracing();
    let settings = load_settings();

    let source = match settings.gameplay.seed {
        Some(seed) => UniformSource::with_seed(seed),
        None => UniformSource::new(),
    };
    let mut game = GameLogic::with_source(blockfall::Board::standard(), source);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app and capture result
    let result = run_app(&mut terminal, &mut game, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    result.context("game loop failed")?;

    let state = game.state();
    tracing::info!(
        score = state.score,
        level = state.level,
        lines = state.lines_cleared,
        "session ended"
    );
    println!("\nThanks for playing BLOCKFALL!");
    println!("Final Score: {}", state.score);
    println!("Level: {} | Lines: {}", state.level, state.lines_cleared);

    Ok(())
}

/// Fixed-rate frame loop: input, then gravity, then draw
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut GameLogic,
    settings: &Settings,
) -> io::Result<()> {
    let input = InputHandler::from_settings(settings);
    let frame_duration = Duration::from_secs_f64(settings.frame_seconds());
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::render_game(frame, &game.snapshot(), settings))?;

        // Handle every pending key before advancing the game
        let mut timeout = frame_duration.saturating_sub(last_tick.elapsed());
        while event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match input.key_down(key) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::Action(action)) => game.handle_input_action(action),
                    None => {}
                }
            }
            timeout = Duration::ZERO;
        }

        let now = Instant::now();
        game.update(now.duration_since(last_tick).as_secs_f64());
        last_tick = now;
    }
}
