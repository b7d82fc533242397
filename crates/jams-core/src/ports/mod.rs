//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the signup rules to remain independent of storage
//! and of the hosted identity service.

pub mod app_dirs;
pub mod auth_session;
pub mod errors;
pub mod identity;
pub mod signup_form_state;

#[cfg(test)]
mod tests;

pub use app_dirs::AppDirsPort;
pub use auth_session::{AuthSessionPort, AUTH_SESSION_STORAGE_KEY};
pub use errors::AppDirsError;
pub use identity::IdentityPort;
pub use signup_form_state::{SignupFormStatePort, SIGNUP_FORM_STORAGE_KEY};
