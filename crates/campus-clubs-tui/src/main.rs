//! Campus Clubs TUI - a terminal client for the Campus Clubs platform.
//!
//! This application provides a keyboard-driven interface for browsing
//! clubs and events, joining them, discussing events, and managing a
//! club's events.

mod app;
mod ui;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use campus_clubs_core::api::ApiClient;
use campus_clubs_core::auth::{SessionData, SessionStore};
use campus_clubs_core::config::Config;
use campus_clubs_core::models::LoginRequest;

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written under the data directory
const LOG_FILE: &str = "campus-clubs.log";

/// Initialize the tracing subscriber for logging.
///
/// Output goes to a log file in the data directory, since stderr is hidden
/// behind the alternate screen. The returned guard flushes it on drop.
fn init_tracing(log_dir: &Path) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if std::fs::create_dir_all(log_dir).is_err() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(filter)
            .init();
        return None;
    }

    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

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

    let config = Config::load().unwrap_or_default();
    let data_dir = config.data_dir().unwrap_or_else(|_| PathBuf::from("./data"));

    // Initialize logging
    let _log_guard = init_tracing(&data_dir);

    // Check for CLI commands
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--login" {
        let email = args
            .get(2)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Usage: campus-clubs --login <email>"))?;
        return login_command(config, data_dir, email).await;
    }
    if args.len() > 1 && args[1] == "--logout" {
        return logout_command(config, data_dir);
    }
    if args.len() > 1 && args[1] == "--whoami" {
        return whoami_command(config, data_dir).await;
    }
    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_usage();
        return Ok(());
    }
    if args.len() > 1 {
        print_usage();
        anyhow::bail!("Unknown argument: {}", args[1]);
    }

    info!("Campus Clubs TUI starting");

    // Create app before touching the terminal so setup errors print normally
    let mut app = App::new()?;
    app.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("Campus Clubs TUI shutting down");
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: campus-clubs [--login <email> | --logout | --whoami]");
    eprintln!();
    eprintln!("With no arguments, starts the terminal interface.");
}

fn session_store(config: &Config, data_dir: PathBuf) -> Arc<SessionStore> {
    Arc::new(SessionStore::new(data_dir, config.token_storage))
}

/// Sign in from the command line and store the session
async fn login_command(mut config: Config, data_dir: PathBuf, email: String) -> Result<()> {
    let sessions = session_store(&config, data_dir);
    let api = ApiClient::new(&config.base_url(), sessions.clone())?;

    eprint!("Password for {}: ", email);
    io::stderr().flush()?;
    let password = rpassword::read_password().context("Failed to read password")?;

    let response = match api.login(&LoginRequest { email: email.clone(), password }).await {
        Ok(r) => r,
        Err(e) => anyhow::bail!(e.message_or("Failed to login")),
    };

    let data = SessionData::new(response.access_token, response.uid, Some(email.clone()));
    sessions.save(&data)?;

    config.last_email = Some(email.clone());
    config.save()?;

    info!(user_uid = %data.user_uid, "Signed in from command line");
    eprintln!("Signed in as {}", email);
    Ok(())
}

/// Forget the stored session
fn logout_command(config: Config, data_dir: PathBuf) -> Result<()> {
    session_store(&config, data_dir).clear()?;
    eprintln!("Signed out");
    Ok(())
}

/// Print the signed-in user's profile as JSON
async fn whoami_command(config: Config, data_dir: PathBuf) -> Result<()> {
    let sessions = session_store(&config, data_dir);
    if sessions.load()?.is_none() {
        anyhow::bail!("No saved session. Run with --login <email> first.");
    }

    let api = ApiClient::new(&config.base_url(), sessions)?;
    let user = api.me().await?;
    eprintln!("Signed in as {}", user.display_name());
    println!("{}", serde_json::to_string_pretty(&user)?);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                // Handle input
                if handle_input(app, key)? {
                    return Ok(());
                }
            }
        }

        // Check for completed background tasks
        app.check_background_tasks();

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
