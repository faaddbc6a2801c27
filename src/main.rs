mod app;
mod auth;
mod cli;
mod config;
mod issue;
mod jira;
mod keybinds;
mod layout;
mod main_actions;
mod main_events;
mod opener;
mod theme;
mod tracker;
mod ui;

use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, Stdout, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::{App, AppAction, FetchRequest};
use crate::auth::{TokenSlot, resolve_credentials};
use crate::cli::{CliCommand, parse_args};
use crate::config::{Config, state_dir};
use crate::issue::{Issue, Transition, UserId};
use crate::jira::JiraClient;
use crate::main_actions::{handle_actions, maybe_start_fetch, start_current_user};
use crate::main_events::{AppEvent, handle_events};
use crate::tracker::{FetchError, SharedTracker};

type TuiBackend = CrosstermBackend<Stdout>;
type Tui = Terminal<TuiBackend>;

const IDLE_POLL: Duration = Duration::from_secs(1);
const BUSY_POLL: Duration = Duration::from_millis(100);
const LOG_FILE: &str = "jiradash.log";

fn main() -> Result<()> {
    init_logging();
    let args: Vec<String> = env::args().collect();
    if let Some(command) = parse_args(&args)? {
        return handle_command(command);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    loop {
        match startup() {
            Ok((config, tracker)) => return run_session(config, tracker, runtime.handle()),
            Err(error) => wait_for_retry(&error)?,
        }
    }
}

fn handle_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::AuthReset => handle_auth_reset(),
    }
}

fn handle_auth_reset() -> Result<()> {
    let config = Config::load()?;
    let slot = TokenSlot::for_server(config.server_url(), config.server_user());
    if slot.clear()? {
        println!("API token removed from keychain.");
        return Ok(());
    }

    println!("No stored API token found.");
    Ok(())
}

/// Everything that has to succeed before the dashboard can open.
fn startup() -> Result<(Config, SharedTracker)> {
    let config = Config::load()?;
    let (credentials, source) = resolve_credentials(config.server_url(), config.server_user())?;
    info!(
        source = source.label(),
        scheme = credentials.scheme(),
        "resolved API token"
    );

    let client = JiraClient::new(config.server_url(), credentials)
        .context("Failed to build tracker client")?;
    let tracker: SharedTracker = Arc::new(client);
    Ok((config, tracker))
}

/// Reports a startup failure outside the dashboard and blocks until the user
/// asks for another attempt. A closed stdin ends the program instead.
fn wait_for_retry(failure: &anyhow::Error) -> Result<()> {
    error!("startup failed: {:#}", failure);
    eprintln!("jiradash could not start: {:#}", failure);
    eprint!("Fix the problem and press Enter to retry (ctrl+c exits). ");
    io::stderr().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        anyhow::bail!("startup failed: {:#}", failure);
    }
    Ok(())
}

fn run_session(config: Config, tracker: SharedTracker, runtime: &Handle) -> Result<()> {
    let mut terminal_guard = TerminalGuard::init()?;
    let mut app = App::new(config, Instant::now());
    let (event_tx, event_rx) = mpsc::channel();
    start_current_user(runtime, tracker.clone(), event_tx.clone());

    run_app(
        terminal_guard.terminal_mut(),
        &mut app,
        runtime,
        &tracker,
        event_rx,
        event_tx,
    )
}

fn run_app(
    terminal: &mut Tui,
    app: &mut App,
    runtime: &Handle,
    tracker: &SharedTracker,
    event_rx: Receiver<AppEvent>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    loop {
        handle_events(app, &event_rx);
        maybe_start_fetch(app, runtime, tracker, &event_tx);
        let size = terminal.size()?;
        if let Some(rows) = ui::list_rows(app, Rect::new(0, 0, size.width, size.height)) {
            app.fit_viewport(rows);
        }
        terminal.draw(|frame| ui::draw(frame, app, Instant::now()))?;

        if app.should_quit() {
            info!("quit requested");
            return Ok(());
        }

        let timeout = if app.busy() { BUSY_POLL } else { IDLE_POLL };
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.note_activity(Instant::now());
            app.on_key(key);
            handle_actions(app, runtime, tracker, &event_tx);
        }

        app.on_tick(Instant::now());
        app.clamp_view();
    }
}

/// Logs go to a file so they never draw over the alternate screen.
fn init_logging() {
    let dir = state_dir();
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(log_file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
    else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();
}

struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    fn init() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
