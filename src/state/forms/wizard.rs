//! Multi-step wizard session: step sequencing over an accumulated form state

use super::field::FieldValue;
use super::form_state::FormState;
use super::schema::{blank_state, Step};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("wizard `{0}` has no steps")]
    NoSteps(String),
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    #[default]
    Editing,
    /// Terminal; the session accepts no further edits or transitions
    Submitted,
}

/// Finished payload handed to a submission sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub flow: String,
    pub data: FormState,
}

/// A wizard in progress.
///
/// Every edit replaces `state` with a new tree; nothing is mutated in place.
/// Rejected transitions are silent: they return `false`/`None` and leave the
/// session where it was.
#[derive(Debug, Clone)]
pub struct WizardSession {
    flow: String,
    steps: Vec<Step>,
    current_step_index: usize,
    state: FormState,
    phase: WizardPhase,
}

impl WizardSession {
    pub fn new(flow: &str, steps: Vec<Step>, initial: FormState) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps(flow.to_string()));
        }
        tracing::debug!(flow, steps = steps.len(), "wizard session started");
        Ok(Self {
            flow: flow.to_string(),
            steps,
            current_step_index: 0,
            state: initial,
            phase: WizardPhase::Editing,
        })
    }

    /// Start a session whose state holds the default of every owned field
    pub fn blank(flow: &str, steps: Vec<Step>) -> Result<Self, WizardError> {
        let initial = blank_state(&steps);
        Self::new(flow, steps, initial)
    }

    pub fn flow(&self) -> &str {
        &self.flow
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current_step_index]
    }

    #[cfg(test)]
    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    pub fn is_first(&self) -> bool {
        self.current_step_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_step_index + 1 == self.step_count()
    }

    /// 1-based step number and the total
    pub fn progress(&self) -> (usize, usize) {
        (self.current_step_index + 1, self.step_count())
    }

    pub fn is_current_step_ready(&self) -> bool {
        self.current_step().is_ready(&self.state)
    }

    /// The single mutation funnel: replace one top-level field.
    ///
    /// Valid at any step; never moves the step index. Returns `false` once the
    /// session has been submitted.
    pub fn apply_field_update(&mut self, field: &str, value: impl Into<FieldValue>) -> bool {
        if self.is_submitted() {
            tracing::debug!(flow = %self.flow, field, "edit ignored after submission");
            return false;
        }
        self.state = self.state.update(field, value);
        true
    }

    /// Advance one step if the current step is ready. No-op on the last step.
    pub fn go_next(&mut self) -> bool {
        if self.is_submitted() || self.is_last() {
            return false;
        }
        if !self.is_current_step_ready() {
            tracing::debug!(
                flow = %self.flow,
                step = self.current_step_index,
                "next rejected: step not ready"
            );
            return false;
        }
        self.current_step_index += 1;
        tracing::debug!(flow = %self.flow, step = self.current_step_index, "advanced");
        true
    }

    /// Retreat one step. Entered data is kept and nothing is validated.
    pub fn go_back(&mut self) {
        if self.is_submitted() || self.is_first() {
            return;
        }
        self.current_step_index -= 1;
        tracing::debug!(flow = %self.flow, step = self.current_step_index, "went back");
    }

    /// Terminal transition, reachable only from a ready last step.
    ///
    /// The payload is the union of every step's owned fields, filled from the
    /// latest state, plus any extra fields set along the way.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.is_submitted() || !self.is_last() {
            return None;
        }
        if !self.is_current_step_ready() {
            tracing::debug!(flow = %self.flow, "submit rejected: last step not ready");
            return None;
        }
        self.phase = WizardPhase::Submitted;
        tracing::info!(flow = %self.flow, "wizard submitted");
        Some(Submission {
            flow: self.flow.clone(),
            data: self.state.with_defaults(&blank_state(&self.steps)),
        })
    }
}
