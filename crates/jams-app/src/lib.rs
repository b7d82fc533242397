//! Jams Application Layer
//!
//! Signup wizard use cases and the session flows (login, resume, sign-out), written against the
//! ports in `jams-core`.

pub mod app_paths;
pub mod usecases;

pub use app_paths::AppPaths;
pub use usecases::{
    BackOutcome, CurrentSession, LoginError, LoginWithPassword, NavigationError, NextOutcome,
    SignOut, SignupFormStore, StepNavigator, SubmissionCoordinator, SubmissionError,
    SubmissionOutcome,
};
