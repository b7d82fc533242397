//! Interactive signup wizard.

use std::io::{BufRead, Write};

use tracing::{info, info_span, Instrument};

use jams_app::usecases::{
    BackOutcome, NavigationError, NextOutcome, StepNavigator, SubmissionOutcome,
};
use jams_core::signup::{StepInput, TOTAL_STEPS};

use super::Prompter;

const BACK_COMMAND: &str = "back";

/// How a wizard session ended.
#[derive(Debug)]
pub enum WizardExit {
    Registered(SubmissionOutcome),
    /// `back` on the first step.
    Left,
    /// Input ran out; progress stays saved.
    Interrupted,
}

/// Ask for the current step until the wizard registers the account or the
/// user leaves. One error message is shown at a time.
pub async fn run_wizard<R: BufRead, W: Write>(
    navigator: &StepNavigator,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<WizardExit> {
    let span = info_span!("cli.signup.wizard");
    async {
        loop {
            let step = navigator.store().current_step().await;
            let label = format!("[{}/{}] {}", step.number(), TOTAL_STEPS, step.title());

            let Some(answer) = prompter.ask(&label)? else {
                info!(?step, "input closed, progress kept");
                return Ok(WizardExit::Interrupted);
            };

            if answer.trim().eq_ignore_ascii_case(BACK_COMMAND) {
                match navigator.handle_back().await {
                    BackOutcome::Moved(_) => continue,
                    BackOutcome::LeaveFlow => return Ok(WizardExit::Left),
                }
            }

            match navigator.submit_step(StepInput::for_step(step, answer)).await {
                Ok(NextOutcome::Advanced(_)) => {}
                Ok(NextOutcome::Submitted(outcome)) => {
                    return Ok(WizardExit::Registered(outcome));
                }
                Err(NavigationError::Validation(errors)) => {
                    let message = errors
                        .first_message_for(step.field())
                        .map(str::to_string)
                        .unwrap_or_else(|| errors.to_string());
                    prompter.say(message)?;
                }
                Err(NavigationError::Submission(err)) => {
                    // The identity service's own message.
                    prompter.say(err)?;
                }
                Err(err @ NavigationError::StepMismatch { .. }) => return Err(err.into()),
            }
        }
    }
    .instrument(span)
    .await
}
