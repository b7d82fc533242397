//! Business logic use cases
//!
//! [front end step input]
//         ↓
// StepNavigator::submit_step      → validation, SignupFormStore
//         ↓ (last step)
// SubmissionCoordinator::submit   → IdentityPort::sign_up, then sign_in_with_password
//
// LoginWithPassword / CurrentSession / SignOut are independent of the wizard
// and keep the session through AuthSessionPort.

pub mod auth;
pub mod signup;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{CurrentSession, LoginError, LoginWithPassword, SignOut};
pub use signup::{
    BackOutcome, NavigationError, NextOutcome, SignupFormStore, StepNavigator,
    SubmissionCoordinator, SubmissionError, SubmissionOutcome,
};
