//! Application state definitions

use super::forms::{layout_rows, FieldRow, FlowKind, FormCursor, Submission, WizardSession};
use crate::sink::Receipt;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Flow picker
    #[default]
    Home,
    /// Active registration wizard
    Wizard,
    /// Result of the last submission
    Done,
}

/// What happened to the last submitted payload
#[derive(Debug, Clone)]
pub enum Outcome {
    Delivered { flow: String, receipt: Receipt },
    /// Kept so the delivery can be retried
    Failed { submission: Submission },
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Home
    pub selected_index: usize,

    // Wizard
    pub session: Option<WizardSession>,
    pub cursor: FormCursor,

    // Done
    pub outcome: Option<Outcome>,

    // UI state
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Flow under the home selection
    pub fn selected_flow(&self) -> FlowKind {
        FlowKind::ALL
            .get(self.selected_index)
            .copied()
            .unwrap_or_default()
    }

    /// Point the home selection at `flow`
    pub fn select_flow(&mut self, flow: FlowKind) {
        self.selected_index = FlowKind::ALL
            .iter()
            .position(|candidate| *candidate == flow)
            .unwrap_or(0);
    }

    /// Enter the wizard view with a fresh session
    pub fn begin_session(&mut self, session: WizardSession) {
        self.session = Some(session);
        self.cursor.reset();
        self.status_message = None;
        self.current_view = View::Wizard;
    }

    /// Drop the session and return to the flow picker
    pub fn abandon_session(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(flow = %session.flow(), "wizard abandoned");
        }
        self.cursor.reset();
        self.current_view = View::Home;
    }

    /// Rows of the current step, empty outside the wizard
    pub fn current_rows(&self) -> Vec<FieldRow> {
        match &self.session {
            Some(session) => layout_rows(session.current_step(), session.state()),
            None => Vec::new(),
        }
    }

    /// Push an error message to the error queue
    pub fn push_error(&mut self, message: String) {
        tracing::warn!(%message, "error queued");
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
