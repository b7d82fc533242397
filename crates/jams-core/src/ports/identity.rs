//! Identity service port
//!
//! The hosted identity service that creates accounts and issues sessions.
//! Implementations are provided by the infrastructure layer (e.g. an HTTP client).
//! Implementations hold no session themselves; callers pass the access token.

use async_trait::async_trait;

use crate::identity::{
    AuthError, AuthSession, AuthUser, Credentials, SignUpRequest, SignUpResponse,
};

#[async_trait]
pub trait IdentityPort: Send + Sync {
    /// Create an account with profile metadata.
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpResponse, AuthError>;

    /// Exchange email/password for a session.
    async fn sign_in_with_password(
        &self,
        credentials: Credentials,
    ) -> Result<AuthSession, AuthError>;

    /// Fetch the account the access token belongs to.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;

    /// Revoke the session the access token belongs to.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
