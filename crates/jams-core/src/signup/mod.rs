//! Signup domain module.
//!
//! Form model, wizard position, field rules, and the submission state machine.

pub mod form;
pub mod login_form;
pub mod step;
pub mod submission;
pub mod validation;

pub use form::{SignupFormData, SignupFormPatch, SignupFormState};
pub use login_form::{validate_login_form, LoginForm};
pub use step::{FormStep, InvalidStep, TOTAL_STEPS};
pub use submission::{SubmissionEvent, SubmissionPhase, SubmissionStateMachine};
pub use validation::{
    validate_complete_form, validate_field, validate_step, FieldIssue, FormField, StepInput,
    ValidationErrors, ValidationResult,
};
