//! Infrastructure adapters for the Jams ports: file and in-memory storage for
//! the wizard and the signed-in session, the hosted identity service client,
//! and platform directories.

pub mod app_dirs;
pub mod auth_session;
pub mod identity;
pub mod signup_form;

pub use app_dirs::DirsAppDirsAdapter;
pub use auth_session::{FileAuthSessionRepository, InMemoryAuthSessionRepository};
pub use identity::SupabaseAuthClient;
pub use signup_form::{FileSignupFormStateRepository, InMemorySignupFormStateRepository};
