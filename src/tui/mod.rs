//! Terminal User Interface for Ladle.
//!
//! Provides the main TUI application loop using ratatui and crossterm.

pub mod app;
mod events;
mod ui;
pub mod widgets;

pub use app::App;
pub use events::{Event, EventHandler};

use crate::config::ConnectionConfig;
use crate::db::{self, QueryResult};
use crate::error::{LadleError, Result};
use crate::reports::Report;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tokio::sync::mpsc;
use tracing::{error, info};

/// A finished background report run, sent back to the main loop.
#[derive(Debug)]
struct ReportOutcome {
    report: Report,
    result: Result<QueryResult>,
}

/// The main TUI application runner.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Creates a new TUI instance, initializing the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::setup_terminal()?;
        Ok(Self { terminal })
    }

    /// Sets up the terminal for TUI rendering.
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()
            .map_err(|e| LadleError::internal(format!("Failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| LadleError::internal(format!("Failed to enter alternate screen: {e}")))?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)
            .map_err(|e| LadleError::internal(format!("Failed to create terminal: {e}")))?;

        Ok(terminal)
    }

    /// Restores the terminal to its original state.
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| LadleError::internal(format!("Failed to disable raw mode: {e}")))?;

        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| LadleError::internal(format!("Failed to leave alternate screen: {e}")))?;

        self.terminal
            .show_cursor()
            .map_err(|e| LadleError::internal(format!("Failed to show cursor: {e}")))?;

        Ok(())
    }

    /// Runs the main TUI event loop.
    pub async fn run(&mut self, connection: &ConnectionConfig) -> Result<()> {
        // Restore the terminal even if we panic mid-draw.
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let mut app_state = App::new(connection);
        let (tx, mut rx) = mpsc::channel::<ReportOutcome>(4);

        let result = self
            .run_event_loop(&mut app_state, connection, tx, &mut rx)
            .await;

        let _ = panic::take_hook();

        result
    }

    /// The main event loop, separated for cleaner error handling.
    async fn run_event_loop(
        &mut self,
        app_state: &mut App,
        connection: &ConnectionConfig,
        tx: mpsc::Sender<ReportOutcome>,
        rx: &mut mpsc::Receiver<ReportOutcome>,
    ) -> Result<()> {
        loop {
            self.terminal
                .draw(|frame| ui::render(frame, app_state))
                .map_err(|e| LadleError::internal(format!("Failed to draw: {e}")))?;

            if !app_state.running {
                break;
            }

            // Wait for either a terminal event or a finished report.
            tokio::select! {
                event_result = tokio::task::spawn_blocking(|| EventHandler::new().next()) => {
                    let event = event_result
                        .map_err(|e| LadleError::internal(format!("Event task failed: {e}")))??;
                    if let Some(action) = app_state.handle_event(event) {
                        self.dispatch_action(action, connection, tx.clone());
                    }
                }

                Some(outcome) = rx.recv() => {
                    if let Err(e) = &outcome.result {
                        error!("Report '{}' failed: {}", outcome.report.label(), e);
                    }
                    app_state.apply_outcome(outcome.report, outcome.result);
                }
            }
        }

        Ok(())
    }

    /// Starts the background task for a requested action.
    fn dispatch_action(
        &self,
        action: app::Action,
        connection: &ConnectionConfig,
        tx: mpsc::Sender<ReportOutcome>,
    ) {
        match action {
            app::Action::Run(report) => {
                let config = connection.clone();
                tokio::spawn(async move {
                    let result = db::run_report(&config, report).await;
                    // The receiver only disappears during shutdown.
                    let _ = tx.send(ReportOutcome { report, result }).await;
                });
            }
        }
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

/// Runs the TUI application.
pub async fn run(connection: &ConnectionConfig) -> Result<()> {
    info!("Starting dashboard for {}", connection.display_string());
    let mut tui = Tui::new()?;
    tui.run(connection).await
}
