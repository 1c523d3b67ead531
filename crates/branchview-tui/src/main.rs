//! branchview - A terminal viewer for a national organization's branch directory.
//!
//! Browse local chapters and districts as expandable cards, search and sort
//! the flattened contact list, and filter by type, status and role.

mod app;
mod config;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::{App, AppState};
use branchview_core::{contacts_view, ContactFilter, ContactSortKey};
use config::Config;
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    data: Option<PathBuf>,
    dump_contacts: bool,
}

impl Args {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Result<Self> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => match args.next() {
                    Some(path) => parsed.data = Some(PathBuf::from(path)),
                    None => bail!("--data needs a path"),
                },
                "--dump-contacts" => parsed.dump_contacts = true,
                other => bail!("Unknown argument: {}", other),
            }
        }
        Ok(parsed)
    }
}

/// Initialize the tracing subscriber, writing to a log file so the
/// terminal UI stays clean. Use RUST_LOG to control the level.
fn init_tracing() -> Option<WorkerGuard> {
    let path = Config::log_path();
    let dir = path.parent()?.to_path_buf();
    let file_name = path.file_name()?.to_os_string();
    std::fs::create_dir_all(&dir).ok()?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
        .init();

    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse(std::env::args().skip(1))?;

    // Initialize logging
    let _log_guard = init_tracing();
    info!("branchview starting");

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Could not read config file, using defaults");
        Config::default()
    });
    config.apply_env(|key| std::env::var(key).ok());
    if let Some(path) = args.data {
        config.data_path = Some(path);
    }

    if args.dump_contacts {
        return dump_contacts(&config);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and kick off the one-shot load
    let mut app = App::new(config);
    app.start_loading();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("branchview shutting down");
    Ok(())
}

/// Print every contact, flattened and sorted by name, to stdout as JSON
fn dump_contacts(config: &Config) -> Result<()> {
    let source = config.data_source();
    eprintln!("Loading {}...", source.describe());

    let response = source.load()?;
    let contacts = contacts_view(
        response.branches(),
        &ContactFilter::default(),
        ContactSortKey::Name,
    );

    let json = serde_json::to_string_pretty(&contacts)?;
    println!("{}", json);

    eprintln!(
        "Done! {} contacts from {} branches.",
        contacts.len(),
        response.branches().len()
    );
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so the load result is picked up
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Check for a completed load
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
