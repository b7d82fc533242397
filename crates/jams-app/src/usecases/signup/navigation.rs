use std::sync::Arc;

use tracing::{debug, info_span, Instrument};

use jams_core::signup::{FormStep, SignupFormPatch, StepInput, ValidationErrors};

use super::store::SignupFormStore;
use super::submission::{SubmissionCoordinator, SubmissionError, SubmissionOutcome};

/// Result of submitting a step.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    /// Moved on to the given step.
    Advanced(FormStep),
    /// The last step was submitted and registration completed.
    Submitted(SubmissionOutcome),
}

/// Result of going back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Moved back to the given step.
    Moved(FormStep),
    /// Already on the first step: the caller should leave the signup flow.
    LeaveFlow,
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("input for step {input:?} submitted while on step {current:?}")]
    StepMismatch { current: FormStep, input: FormStep },
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Drives the wizard: stores each step's data, moves forward or back, and
/// hands the last step to the [`SubmissionCoordinator`].
pub struct StepNavigator {
    store: Arc<SignupFormStore>,
    submission: Arc<SubmissionCoordinator>,
}

impl StepNavigator {
    pub fn new(store: Arc<SignupFormStore>, submission: Arc<SubmissionCoordinator>) -> Self {
        Self { store, submission }
    }

    pub fn store(&self) -> &Arc<SignupFormStore> {
        &self.store
    }

    pub fn submission(&self) -> &Arc<SubmissionCoordinator> {
        &self.submission
    }

    /// Store already-validated step data, then advance or submit.
    ///
    /// No validation happens here: callers run the step rule first.
    pub async fn handle_next(&self, step_data: SignupFormPatch) -> Result<NextOutcome, SubmissionError> {
        let span = info_span!("usecase.signup.handle_next");
        async {
            self.store.update_form_data(step_data).await;

            if self.store.is_last_step().await {
                debug!("last step submitted, registering");
                let outcome = self.submission.submit().await?;
                return Ok(NextOutcome::Submitted(outcome));
            }

            let step = self.store.next_step().await;
            debug!(?step, "advanced signup step");
            Ok(NextOutcome::Advanced(step))
        }
        .instrument(span)
        .await
    }

    /// Validate raw input for the current step, then [`Self::handle_next`].
    pub async fn submit_step(&self, input: StepInput) -> Result<NextOutcome, NavigationError> {
        let current = self.store.current_step().await;
        if input.step() != current {
            return Err(NavigationError::StepMismatch {
                current,
                input: input.step(),
            });
        }

        let patch = input.validate()?;
        Ok(self.handle_next(patch).await?)
    }

    pub async fn handle_back(&self) -> BackOutcome {
        if self.store.is_first_step().await {
            return BackOutcome::LeaveFlow;
        }
        BackOutcome::Moved(self.store.previous_step().await)
    }
}
