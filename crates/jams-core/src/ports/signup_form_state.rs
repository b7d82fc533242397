//! Signup form state port
//!
//! This port defines the contract for persisting the signup wizard between runs.
//! Implementations are provided by the infrastructure layer (e.g., file-based storage).

use async_trait::async_trait;

use crate::signup::SignupFormState;

/// Fixed storage key for the wizard snapshot.
pub const SIGNUP_FORM_STORAGE_KEY: &str = "signup-form-storage";

#[async_trait]
pub trait SignupFormStatePort: Send + Sync {
    /// Load the persisted snapshot, `None` when nothing has been saved yet.
    async fn load(&self) -> anyhow::Result<Option<SignupFormState>>;

    /// Replace the persisted snapshot.
    async fn save(&self, state: &SignupFormState) -> anyhow::Result<()>;
}
