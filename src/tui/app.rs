//! Application state for the TUI.
//!
//! Contains the main App struct plus the action type emitted by event
//! handling for the runner to act on.

use crate::config::ConnectionConfig;
use crate::db::QueryResult;
use crate::error::LadleError;
use crate::reports::Report;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which panel currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Reports,
    Results,
}

impl Focus {
    /// Cycles to the other panel.
    pub fn next(self) -> Self {
        match self {
            Self::Reports => Self::Results,
            Self::Results => Self::Reports,
        }
    }
}

/// An action requested by the user that the runner must perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Execute the given report.
    Run(Report),
}

/// Main application state.
pub struct App {
    /// Whether the application is still running.
    pub running: bool,
    /// Current focus panel.
    pub focus: Focus,
    /// Index of the highlighted report in the catalog.
    pub selected: usize,
    /// True while a report is executing in the background.
    pub is_running_query: bool,
    /// The report whose output is currently displayed.
    pub last_report: Option<Report>,
    /// The most recent successful result.
    pub result: Option<QueryResult>,
    /// The most recent error, shown in the status line.
    pub error: Option<String>,
    /// Vertical scroll offset into the result table (rows from the top).
    pub result_scroll: usize,
    /// Database connection info for the header.
    pub connection_info: String,
}

impl App {
    /// Creates a new App instance.
    pub fn new(connection: &ConnectionConfig) -> Self {
        Self {
            running: true,
            focus: Focus::default(),
            selected: 0,
            is_running_query: false,
            last_report: None,
            result: None,
            error: None,
            result_scroll: 0,
            connection_info: connection.display_string(),
        }
    }

    /// The currently highlighted report.
    pub fn selected_report(&self) -> Report {
        Report::from_index(self.selected).unwrap_or(Report::ALL[0])
    }

    /// Moves the selection up, stopping at the first report.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the selection down, stopping at the last report.
    pub fn select_next(&mut self) {
        if self.selected + 1 < Report::ALL.len() {
            self.selected += 1;
        }
    }

    /// Records the outcome of a finished report run.
    ///
    /// An error replaces only the status line; a previous result stays on
    /// screen so a single failed action does not wipe the dashboard.
    pub fn apply_outcome(
        &mut self,
        report: Report,
        outcome: Result<QueryResult, LadleError>,
    ) {
        self.is_running_query = false;
        match outcome {
            Ok(result) => {
                self.last_report = Some(report);
                self.result = Some(result);
                self.error = None;
                self.result_scroll = 0;
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Handles an event, possibly returning an action for the runner.
    pub fn handle_event(&mut self, event: super::Event) -> Option<Action> {
        match event {
            super::Event::Key(key) => self.handle_key(key),
            super::Event::Resize(_, _) | super::Event::Tick => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Global shortcuts first.
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.running = false;
                return None;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                return None;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::Enter | KeyCode::Char('r') => {
                // One report in flight at a time; ignore the run action while
                // a query is already executing.
                if self.is_running_query {
                    return None;
                }
                self.is_running_query = true;
                self.error = None;
                return Some(Action::Run(self.selected_report()));
            }
            _ => {}
        }

        match self.focus {
            Focus::Reports => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                KeyCode::Home => self.selected = 0,
                KeyCode::End => self.selected = Report::ALL.len() - 1,
                _ => {}
            },
            Focus::Results => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.result_scroll = self.result_scroll.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.result_scroll = self.result_scroll.saturating_add(1);
                }
                KeyCode::PageUp => {
                    self.result_scroll = self.result_scroll.saturating_sub(10);
                }
                KeyCode::PageDown => {
                    self.result_scroll = self.result_scroll.saturating_add(10);
                }
                KeyCode::Home => self.result_scroll = 0,
                _ => {}
            },
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ColumnInfo, Value};
    use crate::tui::Event;
    use pretty_assertions::assert_eq;

    fn test_app() -> App {
        let conn = ConnectionConfig {
            host: Some("localhost".to_string()),
            port: 3306,
            database: Some("food_waste".to_string()),
            user: Some("reporting".to_string()),
            password: None,
        };
        App::new(&conn)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_app_new() {
        let app = test_app();
        assert!(app.running);
        assert_eq!(app.focus, Focus::Reports);
        assert_eq!(app.selected, 0);
        assert!(app.result.is_none());
        assert_eq!(app.connection_info, "food_waste @ localhost:3306");
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut app = test_app();

        app.handle_event(key(KeyCode::Up));
        assert_eq!(app.selected, 0, "clamped at the first report");

        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.selected, 1);

        app.handle_event(key(KeyCode::End));
        assert_eq!(app.selected, Report::ALL.len() - 1);

        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.selected, Report::ALL.len() - 1, "clamped at the last report");

        app.handle_event(key(KeyCode::Home));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_enter_runs_selected_report() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Down));

        let action = app.handle_event(key(KeyCode::Enter));
        assert_eq!(action, Some(Action::Run(Report::TopFoodItems)));
        assert!(app.is_running_query);
    }

    #[test]
    fn test_run_ignored_while_query_in_flight() {
        let mut app = test_app();
        let first = app.handle_event(key(KeyCode::Enter));
        assert!(first.is_some());

        let second = app.handle_event(key(KeyCode::Enter));
        assert_eq!(second, None, "only one report runs at a time");
    }

    #[test]
    fn test_apply_outcome_success() {
        let mut app = test_app();
        app.is_running_query = true;
        app.result_scroll = 7;

        let result = QueryResult::with_data(
            vec![ColumnInfo::new("Status", "VARCHAR")],
            vec![vec![Value::String("Completed".to_string())]],
        );
        app.apply_outcome(Report::ClaimsPerStatus, Ok(result));

        assert!(!app.is_running_query);
        assert_eq!(app.last_report, Some(Report::ClaimsPerStatus));
        assert!(app.result.is_some());
        assert!(app.error.is_none());
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_apply_outcome_error_keeps_previous_result() {
        let mut app = test_app();
        let result = QueryResult::with_data(vec![ColumnInfo::new("n", "INT")], vec![]);
        app.apply_outcome(Report::ClaimsPerStatus, Ok(result));

        app.is_running_query = true;
        app.apply_outcome(
            Report::TopFoodItems,
            Err(LadleError::query("Table 'food_waste.clams' doesn't exist")),
        );

        assert!(!app.is_running_query);
        assert!(app.error.is_some(), "error shown for the failed action");
        assert!(app.result.is_some(), "previous result remains visible");
        assert_eq!(app.last_report, Some(Report::ClaimsPerStatus));
        assert!(app.running, "interface stays usable after a failure");
    }

    #[test]
    fn test_tab_switches_focus() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Results);
        app.handle_event(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Reports);
    }

    #[test]
    fn test_result_scroll_with_focus() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Tab));

        app.handle_event(key(KeyCode::Down));
        app.handle_event(key(KeyCode::Down));
        assert_eq!(app.result_scroll, 2);

        app.handle_event(key(KeyCode::PageDown));
        assert_eq!(app.result_scroll, 12);

        app.handle_event(key(KeyCode::Home));
        assert_eq!(app.result_scroll, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_event(key(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = test_app();
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(!app.running);
    }
}
