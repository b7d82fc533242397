//! Auth session port
//!
//! Keeps the signed-in session between runs. Implementations are provided by
//! the infrastructure layer (e.g., file-based storage).

use async_trait::async_trait;

use crate::identity::AuthSession;

/// Fixed storage key for the session record.
pub const AUTH_SESSION_STORAGE_KEY: &str = "auth-session";

#[async_trait]
pub trait AuthSessionPort: Send + Sync {
    /// Load the stored session, `None` when signed out.
    async fn load(&self) -> anyhow::Result<Option<AuthSession>>;

    /// Replace the stored session.
    async fn save(&self, session: &AuthSession) -> anyhow::Result<()>;

    /// Forget the stored session. Clearing when nothing is stored succeeds.
    async fn clear(&self) -> anyhow::Result<()>;
}
