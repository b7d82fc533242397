//! Signup wizard use cases.

pub mod navigation;
pub mod store;
pub mod submission;

pub use navigation::{BackOutcome, NavigationError, NextOutcome, StepNavigator};
pub use store::SignupFormStore;
pub use submission::{SubmissionCoordinator, SubmissionError, SubmissionOutcome};
