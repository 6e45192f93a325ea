//! Form submission lifecycle.
//!
//! Submissions are simulated: a valid form waits a fixed delay, shows a
//! success state, and reverts to idle after another delay. Every action
//! bumps a generation number, and a pending revert only applies while its
//! generation is still current, so a stale revert cannot clobber a newer
//! submission.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::deferred::Deferred;
use crate::validate::{FormReport, FormValidator, FormValues};

pub const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REVERT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub status: SubmissionStatus,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub submission_delay: Duration,
    /// How long the success state stays up before reverting.
    pub revert_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            submission_delay: DEFAULT_SUBMISSION_DELAY,
            revert_delay: DEFAULT_REVERT_DELAY,
        }
    }
}

pub struct FormSession {
    validator: FormValidator,
    config: SessionConfig,
    state: Arc<watch::Sender<SessionState>>,
    revert: Deferred,
}

impl FormSession {
    pub fn new(validator: FormValidator, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState {
            status: SubmissionStatus::Idle,
            generation: 0,
        });
        FormSession {
            validator,
            config,
            state: Arc::new(state),
            revert: Deferred::new(),
        }
    }

    pub fn validator(&self) -> &FormValidator {
        &self.validator
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Validate and, if valid, run the simulated submission.
    ///
    /// Returns the generation of this submission. An invalid form leaves
    /// the state untouched and returns the report.
    pub async fn submit(&mut self, values: &FormValues, today: NaiveDate) -> Result<u64, FormReport> {
        let report = self.validator.validate(values, today);
        if !report.is_valid() {
            tracing::info!(errors = report.errors.len(), "form validation failed");
            return Err(report);
        }

        let generation = self.begin(SubmissionStatus::Submitting);
        tracing::info!(generation, "submitting form");

        sleep(self.config.submission_delay).await;

        if !transition_if_current(&self.state, generation, SubmissionStatus::Succeeded) {
            return Ok(generation);
        }
        tracing::info!(generation, "form submitted");

        let state = Arc::clone(&self.state);
        self.revert.arm(self.config.revert_delay, move || {
            if transition_if_current(&state, generation, SubmissionStatus::Idle) {
                tracing::debug!(generation, "success state reverted");
            }
        });

        Ok(generation)
    }

    /// Dismiss the success state now ("Done" / "Register another").
    pub fn dismiss(&mut self) {
        self.begin(SubmissionStatus::Idle);
    }

    fn begin(&mut self, status: SubmissionStatus) -> u64 {
        self.revert.cancel();
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.status = status;
            generation = s.generation;
        });
        generation
    }
}

/// Move to `status` only if no newer action has happened since `generation`.
fn transition_if_current(
    state: &watch::Sender<SessionState>,
    generation: u64,
    status: SubmissionStatus,
) -> bool {
    state.send_if_modified(|s| {
        if s.generation == generation {
            s.status = status;
            true
        } else {
            false
        }
    })
}
