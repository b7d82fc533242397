//! Use case for signing in an existing account.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use jams_core::identity::{AuthError, AuthSession, Credentials};
use jams_core::ports::{AuthSessionPort, IdentityPort};
use jams_core::signup::{validate_login_form, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    Auth(#[from] AuthError),
}

/// Validates the login form, makes a single password grant and keeps the
/// issued session.
pub struct LoginWithPassword {
    identity: Arc<dyn IdentityPort>,
    sessions: Arc<dyn AuthSessionPort>,
}

impl LoginWithPassword {
    pub fn new(identity: Arc<dyn IdentityPort>, sessions: Arc<dyn AuthSessionPort>) -> Self {
        Self { identity, sessions }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<AuthSession, LoginError> {
        let span = info_span!("usecase.login_with_password.execute");
        async {
            let form = validate_login_form(email, password)?;

            let session = self
                .identity
                .sign_in_with_password(Credentials {
                    email: form.email,
                    password: form.password,
                })
                .await
                .map_err(|err| {
                    warn!(status = err.status, error = %err, "login rejected");
                    err
                })?;

            info!(user_id = %session.user.id, "user logged in");
            if let Err(err) = self.sessions.save(&session).await {
                warn!(error = %err, "failed to persist session, it ends with this run");
            }
            Ok(session)
        }
        .instrument(span)
        .await
    }
}
