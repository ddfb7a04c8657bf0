//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Service integration
//!
//! Analysis is synchronous: one narrative runs to completion inside the
//! event loop before the next key is processed.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::ForestClassifier;
use crate::application::TriageService;
use crate::domain::{rules, Lexicon, TriageReport};

use super::ui::{
    dashboard::{render_dashboard, DashboardState},
    entry::{render_entry, EntryState},
    render_disclaimer,
    report::render_report,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Entry,
    Report,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Triage service over the loaded artifacts
    service: TriageService<ForestClassifier>,

    /// Dashboard state
    dashboard_state: DashboardState,

    /// Entry form state
    entry_state: EntryState,

    /// Last completed report, if any
    report: Option<TriageReport>,
}

impl App {
    /// Create a new application instance, loading artifacts from disk.
    ///
    /// Refuses to start if the lexicon or forest model cannot be loaded:
    /// a triage tool with partial artifacts is worse than none.
    ///
    /// # Errors
    /// Returns error if the artifact directory is missing or an artifact
    /// fails validation.
    pub fn new() -> Result<Self> {
        let artifact_path = std::env::var("VHT_TRIAGE_ARTIFACT_DIR")
            .unwrap_or_else(|_| "artifacts".to_string());
        let artifact_dir = std::path::Path::new(&artifact_path);

        if !artifact_dir.exists() {
            return Err(anyhow!(
                "Artifact path not found at {:?}. Set VHT_TRIAGE_ARTIFACT_DIR to a directory containing symptom_map.json, keyword_lookup.json and forest_model.json.",
                artifact_dir
            ));
        }

        let lexicon = Lexicon::from_artifact_dir(artifact_dir)
            .map_err(|e| anyhow!("Failed to load lexicon from {:?}: {}", artifact_dir, e))?;
        let classifier = ForestClassifier::load(artifact_dir)
            .map_err(|e| anyhow!("Failed to load model from {:?}: {}", artifact_dir, e))?;

        let dashboard_state = DashboardState {
            symptom_count: lexicon.symptom_count(),
            keyword_count: lexicon.keyword_count(),
            rule_edges: rules::edge_count(),
            tree_count: classifier.tree_count(),
            analyses: 0,
        };

        let service = TriageService::new(Arc::new(lexicon), Arc::new(classifier));

        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            service,
            dashboard_state,
            entry_state: EntryState::default(),
            report: None,
        })
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Dashboard => {
                        render_dashboard(f, content_area, &self.dashboard_state);
                    }
                    Screen::Entry => render_entry(f, content_area, &self.entry_state),
                    Screen::Report => {
                        if let Some(report) = &self.report {
                            render_report(f, content_area, report);
                        }
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Dashboard => self.handle_dashboard_key(key),
            Screen::Entry => self.handle_entry_key(key, modifiers),
            Screen::Report => self.handle_report_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.entry_state = EntryState::default();
                self.screen = Screen::Entry;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_entry_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Left | KeyCode::Up => {
                self.entry_state.prev_preset();
            }
            KeyCode::Right | KeyCode::Down => {
                self.entry_state.next_preset();
            }
            KeyCode::Enter => {
                self.submit_analysis();
            }
            KeyCode::Backspace => {
                self.entry_state.delete_char();
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.entry_state.clear();
            }
            KeyCode::Char(c) => {
                self.entry_state.input_char(c);
            }
            _ => {}
        }
    }

    fn handle_report_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => {
                self.screen = Screen::Dashboard;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.entry_state = EntryState::default();
                self.screen = Screen::Entry;
            }
            _ => {}
        }
    }

    fn submit_analysis(&mut self) {
        match self.service.analyze(&self.entry_state.input) {
            Ok(report) => {
                self.report = Some(report);
                self.dashboard_state.analyses += 1;
                self.screen = Screen::Report;
            }
            Err(e) => {
                tracing::warn!("Analysis rejected: {}", e);
                self.entry_state.message = Some(e.to_string());
            }
        }
    }
}
