//! Application state and main event loop.
//!
//! The [`App`] owns the dashboard. Poll outcomes arrive over a channel from
//! the poller and are applied between frames, so rendering and updates never
//! overlap.

use std::io::{self, Write};
use std::time::Duration;

use chrono::Local;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::error::TryRecvError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use batterydash_core::config::DashboardConfig;
use batterydash_core::dashboard::Dashboard;
use batterydash_core::demo::DemoSource;
use batterydash_core::poll::{spawn_poller, PollOutcome};
use batterydash_core::source::{HttpSource, TelemetrySource};
use batterydash_core::surface::MemorySurface;

use super::ui;
use crate::BUILD_ID;

/// How long to wait for keyboard input before redrawing
const INPUT_POLL: Duration = Duration::from_millis(200);

/// All state for the terminal dashboard
pub struct App {
    pub dashboard: Dashboard<MemorySurface>,
    /// Where telemetry comes from, for the header
    pub source: String,
    pub build_id: &'static str,
    pub should_quit: bool,
}

impl App {
    pub fn new(source: String) -> Self {
        Self {
            dashboard: Dashboard::bootstrap(MemorySurface::new()),
            source,
            build_id: BUILD_ID,
            should_quit: false,
        }
    }

    /// Apply one poll outcome, stamped with local wall-clock time
    pub fn on_outcome(&mut self, outcome: PollOutcome) {
        self.dashboard.handle(outcome, Local::now().naive_local());
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            _ => {}
        }
    }
}

/// Main entry point for the terminal dashboard.
///
/// Starts polling the configured source, sets up the terminal and runs the
/// event loop until the user quits.
pub async fn run(config: DashboardConfig) -> anyhow::Result<()> {
    if config.demo_mode {
        run_with_source(DemoSource::new(), &config).await
    } else {
        run_with_source(HttpSource::new(config.endpoint.clone()), &config).await
    }
}

async fn run_with_source<S: TelemetrySource>(
    source: S,
    config: &DashboardConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(source.describe());
    let cancel = CancellationToken::new();
    let mut outcomes = spawn_poller(source, config.poll_interval(), cancel.clone());
    // Stops the poller on every exit path
    let _poller = cancel.drop_guard();

    // Setup terminal
    enable_raw_mode()?;
    let restore = TerminalGuard::new(io::stdout());
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Input polling blocks; requires the multi-threaded runtime
    let result =
        tokio::task::block_in_place(|| event_loop(&mut terminal, &mut app, &mut outcomes));

    drop(restore);

    info!(
        applied = app.dashboard.applied_count(),
        failed = app.dashboard.failed_count(),
        "dashboard closed"
    );
    result
}

/// Leaves raw mode and the alternate screen when dropped
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, cursor::Show) {
            warn!("failed to restore terminal: {}", e);
        }
    }
}

/// Apply every outcome that has arrived since the last frame.
///
/// Returns false once the poller has gone away.
fn drain_outcomes(
    app: &mut App,
    outcomes: &mut tokio::sync::mpsc::UnboundedReceiver<PollOutcome>,
) -> bool {
    loop {
        match outcomes.try_recv() {
            Ok(outcome) => app.on_outcome(outcome),
            Err(TryRecvError::Empty) => return true,
            Err(TryRecvError::Disconnected) => return false,
        }
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcomes: &mut tokio::sync::mpsc::UnboundedReceiver<PollOutcome>,
) -> anyhow::Result<()> {
    loop {
        if !drain_outcomes(app, outcomes) {
            warn!("poller stopped unexpectedly");
            app.should_quit = true;
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
