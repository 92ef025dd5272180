//! Application state and core logic

use crate::config::SignupConfig;
use crate::platform::{ACTION_MODIFIER, SUBMIT_SHORTCUT};
use crate::sink::{JsonFileSink, SubmissionSink};
use crate::state::{
    layout_rows, AppState, FieldEdit, FieldRow, FlowKind, FormState, Outcome, Submission, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Destination for submitted payloads
    sink: Box<dyn SubmissionSink>,
    config: SignupConfig,
    /// Whether config changes are written back to disk
    persist_config: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance writing submissions as JSON files
    pub fn new() -> Result<Self> {
        let config = SignupConfig::load()?;
        let dir = config.submissions_dir();
        tracing::info!(dir = %dir.display(), "submissions directory");

        let mut app = Self::with_sink(config, Box::new(JsonFileSink::new(dir)));
        app.persist_config = true;
        Ok(app)
    }

    /// Create an App delivering to `sink`; config changes stay in memory
    pub fn with_sink(config: SignupConfig, sink: Box<dyn SubmissionSink>) -> Self {
        let mut state = AppState::default();
        state.select_flow(config.last_flow.unwrap_or_default());

        Self {
            state,
            sink,
            config,
            persist_config: false,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Error dialog is modal
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Home => self.handle_home_key(key).await?,
            View::Wizard => self.handle_wizard_key(key).await?,
            View::Done => self.handle_done_key(key).await?,
        }

        Ok(())
    }

    /// Handle keys in Home view
    async fn handle_home_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_selection_down(FlowKind::ALL.len())
            }
            KeyCode::Up | KeyCode::Char('k') => self.state.move_selection_up(),
            KeyCode::Enter | KeyCode::Char(' ') => self.start_flow(self.state.selected_flow())?,
            _ => {}
        }
        Ok(())
    }

    /// Start a blank session for `flow` and remember it as the last one used
    fn start_flow(&mut self, flow: FlowKind) -> Result<()> {
        let session = flow.start()?;
        tracing::info!(flow = flow.name(), "wizard started");
        self.state.begin_session(session);

        if self.config.last_flow != Some(flow) {
            self.config.last_flow = Some(flow);
            if self.persist_config {
                if let Err(err) = self.config.save() {
                    tracing::warn!("Failed to save config: {err:#}");
                }
            }
        }
        Ok(())
    }

    /// Handle keys in Wizard view
    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        let row_count = self.state.current_rows().len();
        let on_action = key.modifiers.contains(ACTION_MODIFIER);
        let on_control = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.state.abandon_session(),
            KeyCode::Tab | KeyCode::Down => self.state.cursor.next_row(row_count),
            KeyCode::BackTab | KeyCode::Up => self.state.cursor.prev_row(row_count),
            KeyCode::PageDown => self.next_step(),
            KeyCode::PageUp => self.prev_step(),
            // Ctrl+S works on all platforms
            KeyCode::Char('s') if on_control => self.submit().await,
            KeyCode::Char('n') if on_action => self.next_step(),
            KeyCode::Char('b') if on_action => self.prev_step(),
            KeyCode::Char('d') if on_action => {
                self.edit_current_row(|row, state, _| row.remove(state))
            }
            KeyCode::Char(_) if on_action || on_control => {}
            KeyCode::Enter => self.edit_current_row(|row, state, draft| row.activate(state, draft)),
            KeyCode::Char(' ') if !self.current_row_accepts_text() => {
                self.edit_current_row(|row, state, draft| row.activate(state, draft))
            }
            KeyCode::Char(c) => {
                self.edit_current_row(|row, state, draft| row.input_char(state, draft, c))
            }
            KeyCode::Backspace => {
                self.edit_current_row(|row, state, draft| row.backspace(state, draft))
            }
            _ => {}
        }
        Ok(())
    }

    fn current_row_accepts_text(&self) -> bool {
        self.state
            .current_rows()
            .get(self.state.cursor.active_row)
            .is_some_and(FieldRow::accepts_text)
    }

    /// Run a row edit and feed the result through the session's update funnel
    fn edit_current_row<F>(&mut self, edit: F)
    where
        F: FnOnce(&FieldRow, &FormState, &mut String) -> Option<FieldEdit>,
    {
        let rows = self.state.current_rows();
        let Some(row) = rows.get(self.state.cursor.active_row) else {
            return;
        };
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        let Some(FieldEdit { field, value }) =
            edit(row, session.state(), &mut self.state.cursor.draft)
        else {
            return;
        };

        session.apply_field_update(&field, value);
        let row_count = layout_rows(session.current_step(), session.state()).len();
        self.state.cursor.clamp(row_count);
        self.state.status_message = None;
    }

    fn next_step(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if session.is_last() {
            self.state.status_message =
                Some(format!("Last step: press {SUBMIT_SHORTCUT} to submit"));
            return;
        }

        if session.go_next() {
            self.state.cursor.reset();
            self.state.status_message = None;
        } else {
            self.state.status_message = Some(format!(
                "Complete \"{}\" before continuing",
                session.current_step().title
            ));
        }
    }

    fn prev_step(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };
        if session.is_first() {
            return;
        }
        session.go_back();
        self.state.cursor.reset();
        self.state.status_message = None;
    }

    /// Submit the session and hand the payload to the sink
    async fn submit(&mut self) {
        let Some(session) = self.state.session.as_mut() else {
            return;
        };

        match session.submit() {
            Some(submission) => {
                self.state.session = None;
                self.state.cursor.reset();
                self.state.status_message = None;
                self.deliver(submission).await;
            }
            None if !session.is_last() => {
                self.state.status_message = Some("Submit is available on the last step".into());
            }
            None => {
                self.state.status_message = Some(format!(
                    "Complete \"{}\" before submitting",
                    session.current_step().title
                ));
            }
        }
    }

    async fn deliver(&mut self, submission: Submission) {
        match self.sink.deliver(&submission).await {
            Ok(receipt) => {
                tracing::info!(flow = %submission.flow, id = %receipt.id, "submission delivered");
                self.state.outcome = Some(Outcome::Delivered {
                    flow: submission.flow,
                    receipt,
                });
            }
            Err(err) => {
                self.push_error(format!(
                    "Failed to deliver {} submission: {err}",
                    submission.flow
                ));
                self.state.outcome = Some(Outcome::Failed { submission });
            }
        }
        self.state.current_view = View::Done;
    }

    /// Handle keys in Done view
    async fn handle_done_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('r') => {
                if let Some(Outcome::Failed { submission }) = &self.state.outcome {
                    let submission = submission.clone();
                    self.deliver(submission).await;
                }
            }
            KeyCode::Enter | KeyCode::Esc => {
                // Leaving discards a failed payload
                self.state.outcome = None;
                self.state.current_view = View::Home;
            }
            _ => {}
        }
        Ok(())
    }
}
