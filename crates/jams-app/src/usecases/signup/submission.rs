use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use jams_core::identity::{AuthError, AuthSession, AuthUser, SignUpRequest};
use jams_core::ports::{AuthSessionPort, IdentityPort};
use jams_core::signup::{SubmissionEvent, SubmissionPhase, SubmissionStateMachine};

use super::store::SignupFormStore;

/// Why a registration attempt failed. `Display` is the identity service's
/// message, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// Account creation was rejected; no login was attempted.
    #[error("{0}")]
    Signup(#[source] AuthError),
    /// The account exists but the follow-up login failed, so there is no session.
    #[error("{0}")]
    Login(#[source] AuthError),
}

impl SubmissionError {
    pub fn auth_error(&self) -> &AuthError {
        match self {
            SubmissionError::Signup(err) | SubmissionError::Login(err) => err,
        }
    }
}

/// A registered and signed-in account.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    pub user: AuthUser,
    pub session: AuthSession,
}

/// Creates the account from the collected form, then signs in with the same
/// credentials. Either call failing ends the attempt; nothing is retried.
pub struct SubmissionCoordinator {
    identity: Arc<dyn IdentityPort>,
    store: Arc<SignupFormStore>,
    sessions: Option<Arc<dyn AuthSessionPort>>,
    phase: Mutex<SubmissionPhase>,
}

impl SubmissionCoordinator {
    pub fn new(identity: Arc<dyn IdentityPort>, store: Arc<SignupFormStore>) -> Self {
        Self {
            identity,
            store,
            sessions: None,
            phase: Mutex::new(SubmissionPhase::Idle),
        }
    }

    /// Keep the session issued after a successful registration.
    pub fn with_session_store(mut self, sessions: Arc<dyn AuthSessionPort>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub async fn phase(&self) -> SubmissionPhase {
        *self.phase.lock().await
    }

    pub async fn submit(&self) -> Result<SubmissionOutcome, SubmissionError> {
        let span = info_span!("usecase.signup.submit");
        async {
            self.apply(SubmissionEvent::Start).await;

            let form = self.store.get_all_form_data().await;
            let request = SignUpRequest::from_form(&form);
            let credentials = request.credentials();

            if let Err(err) = self.identity.sign_up(request).await {
                self.apply(SubmissionEvent::SignupFailed).await;
                warn!(status = err.status, error = %err, "signup rejected");
                return Err(SubmissionError::Signup(err));
            }
            self.apply(SubmissionEvent::SignupSucceeded).await;
            info!("user created");

            let session = match self.identity.sign_in_with_password(credentials).await {
                Ok(session) => session,
                Err(err) => {
                    self.apply(SubmissionEvent::LoginFailed).await;
                    warn!(
                        status = err.status,
                        error = %err,
                        "login after signup failed, account has no session"
                    );
                    return Err(SubmissionError::Login(err));
                }
            };
            self.apply(SubmissionEvent::LoginSucceeded).await;
            info!(user_id = %session.user.id, "user logged in");

            if let Some(sessions) = &self.sessions {
                if let Err(err) = sessions.save(&session).await {
                    warn!(error = %err, "failed to persist session, it ends with this run");
                }
            }
            self.store.reset_form().await;

            Ok(SubmissionOutcome {
                user: session.user.clone(),
                session,
            })
        }
        .instrument(span)
        .await
    }

    async fn apply(&self, event: SubmissionEvent) {
        let mut phase = self.phase.lock().await;
        let next = SubmissionStateMachine::transition(*phase, event);
        debug!(from = ?*phase, to = ?next, ?event, "submission phase transition");
        *phase = next;
    }
}
