//! Use case for resuming the stored session at startup.

use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};

use jams_core::identity::{AuthError, AuthSession};
use jams_core::ports::{AuthSessionPort, IdentityPort};

/// Checks the stored session against the identity service.
///
/// A session the service rejects (expired, revoked, unknown user) is cleared,
/// and the service's message is returned unchanged so the caller can send the
/// user back to login.
pub struct CurrentSession {
    identity: Arc<dyn IdentityPort>,
    sessions: Arc<dyn AuthSessionPort>,
}

impl CurrentSession {
    pub fn new(identity: Arc<dyn IdentityPort>, sessions: Arc<dyn AuthSessionPort>) -> Self {
        Self { identity, sessions }
    }

    /// `Ok(None)` when signed out. On success the stored user record is
    /// refreshed from the service.
    pub async fn execute(&self) -> Result<Option<AuthSession>, AuthError> {
        let span = info_span!("usecase.current_session.execute");
        async {
            let mut session = match self.sessions.load().await {
                Ok(Some(session)) => session,
                Ok(None) => {
                    debug!("no stored session");
                    return Ok(None);
                }
                Err(err) => {
                    warn!(error = %err, "stored session unreadable, discarding it");
                    self.forget().await;
                    return Ok(None);
                }
            };

            match self.identity.get_user(&session.access_token).await {
                Ok(user) => {
                    session.user = user;
                    if let Err(err) = self.sessions.save(&session).await {
                        warn!(error = %err, "failed to refresh stored session");
                    }
                    debug!(user_id = %session.user.id, "stored session is valid");
                    Ok(Some(session))
                }
                Err(err) => {
                    warn!(status = err.status, error = %err, "stored session rejected");
                    self.forget().await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn forget(&self) {
        if let Err(err) = self.sessions.clear().await {
            warn!(error = %err, "failed to clear stored session");
        }
    }
}
