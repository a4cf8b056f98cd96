//! Terminal UI for Strictly Solo

mod app;
mod input;
mod ui;

use anyhow::{Context, Result};
use app::{App, Control};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use strictly_solo::{AudioSink, GameSession, Muted, RandomSelector, Settings, TerminalBell};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const INPUT_POLL: Duration = Duration::from_millis(100);

/// Run the terminal game until the player quits.
pub async fn run_tui(settings: &Settings, seed: Option<u64>) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create(settings.log_file()).with_context(|| {
        format!("Failed to create log file {}", settings.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(settings.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(?seed, sound = settings.sound(), "Starting Strictly Solo TUI");

    let selector = match seed {
        Some(seed) => RandomSelector::from_seed(seed),
        None => RandomSelector::new(),
    };
    let audio: Box<dyn AudioSink> = if *settings.sound() {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(Muted)
    };
    let (session, handle) = GameSession::new(selector, audio, settings.delays());
    let session_task = tokio::spawn(session.run());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, App::new(handle)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    if let Err(err) = session_task.await {
        warn!(error = %err, "Session task ended abnormally");
    }
    info!("Strictly Solo TUI closed");
    res
}

/// Redraws on every published state and forwards keys to the app.
#[instrument(skip_all)]
async fn run_app(terminal: &mut Tui, mut app: App) -> Result<()> {
    let mut states = app.subscribe();
    let mut keys = spawn_input_reader();

    loop {
        let state = states.borrow_and_update().clone();
        terminal.draw(|frame| ui::draw(frame, &state, app.cursor()))?;

        tokio::select! {
            key = keys.recv() => match key {
                Some(code) => {
                    if app.handle_key(code)? == Control::Quit {
                        info!("Player quit");
                        return Ok(());
                    }
                }
                None => return Ok(()),
            },
            changed = states.changed() => {
                if changed.is_err() {
                    debug!("Session closed");
                    return Ok(());
                }
            }
        }
    }
}

/// Reads key presses on a blocking thread until the receiver goes away.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<KeyCode> {
    let (key_tx, key_rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || {
        while !key_tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    warn!(error = %e, "Input poll failed");
                    break;
                }
            }
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if key_tx.send(key.code).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "Input read failed");
                    break;
                }
            }
        }
    });
    key_rx
}
