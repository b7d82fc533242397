//! Submission state machine.
//!
//! Pure transition function for the signup-then-login sequence. Side effects
//! live in the application layer.

use serde::Serialize;

/// Phase of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    SubmittingSignup,
    SubmittingLogin,
    Success,
    Failed,
}

impl SubmissionPhase {
    /// A call to the identity service is outstanding.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            SubmissionPhase::SubmittingSignup | SubmissionPhase::SubmittingLogin
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SubmissionPhase::Success | SubmissionPhase::Failed)
    }
}

/// Facts that drive the submission phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Start,
    SignupSucceeded,
    SignupFailed,
    LoginSucceeded,
    LoginFailed,
}

pub struct SubmissionStateMachine;

impl SubmissionStateMachine {
    /// Next phase; events that do not apply leave the phase unchanged.
    pub fn transition(phase: SubmissionPhase, event: SubmissionEvent) -> SubmissionPhase {
        use SubmissionEvent as E;
        use SubmissionPhase as P;

        match (phase, event) {
            (P::Idle | P::Success | P::Failed, E::Start) => P::SubmittingSignup,
            (P::SubmittingSignup, E::SignupSucceeded) => P::SubmittingLogin,
            (P::SubmittingSignup, E::SignupFailed) => P::Failed,
            (P::SubmittingLogin, E::LoginSucceeded) => P::Success,
            (P::SubmittingLogin, E::LoginFailed) => P::Failed,
            (phase, _) => phase,
        }
    }
}
