use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use jams_core::identity::AuthError;
use jams_core::ports::{AuthSessionPort, IdentityPort};

/// Revokes the stored session and forgets it locally.
pub struct SignOut {
    identity: Arc<dyn IdentityPort>,
    sessions: Arc<dyn AuthSessionPort>,
}

impl SignOut {
    pub fn new(identity: Arc<dyn IdentityPort>, sessions: Arc<dyn AuthSessionPort>) -> Self {
        Self { identity, sessions }
    }

    /// Returns `false` when there was no session to end. The local session is
    /// cleared even when the identity service rejects the call.
    pub async fn execute(&self) -> Result<bool, AuthError> {
        let span = info_span!("usecase.sign_out.execute");
        async {
            let stored = match self.sessions.load().await {
                Ok(stored) => stored,
                Err(err) => {
                    warn!(error = %err, "stored session unreadable, discarding it");
                    None
                }
            };

            let result = match &stored {
                Some(session) => self.identity.sign_out(&session.access_token).await,
                None => Ok(()),
            };

            if let Err(err) = self.sessions.clear().await {
                warn!(error = %err, "failed to clear stored session");
            }

            match (stored, result) {
                (None, _) => {
                    debug!("no session stored, nothing to sign out");
                    Ok(false)
                }
                (Some(_), Ok(())) => {
                    info!("user signed out");
                    Ok(true)
                }
                (Some(_), Err(err)) => {
                    warn!(status = err.status, error = %err, "sign out rejected");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
