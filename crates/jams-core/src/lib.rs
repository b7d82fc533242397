//! # jams-core
//!
//! Core domain models and signup rules for Jams.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod app_dirs;
pub mod config;
pub mod identity;
pub mod ports;
pub mod security;
pub mod signup;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use identity::{AuthError, AuthSession, AuthUser, Credentials, SignUpRequest, SignUpResponse};
pub use security::SecretString;
pub use signup::{FormStep, SignupFormData, SignupFormPatch, SignupFormState};
