//! # Dependency Injection
//!
//! The only place that depends on `jams-infra` and `jams-app` at once. It
//! assembles adapters behind their ports and hands back use cases; it makes
//! no decisions about what to run.

use std::sync::Arc;

use jams_app::usecases::{
    CurrentSession, LoginWithPassword, SignOut, SignupFormStore, StepNavigator,
    SubmissionCoordinator,
};
use jams_app::AppPaths;
use jams_core::config::AppConfig;
use jams_core::ports::{AuthSessionPort, IdentityPort, SignupFormStatePort};
use jams_infra::{FileAuthSessionRepository, FileSignupFormStateRepository, SupabaseAuthClient};

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Identity client initialization failed: {0}")]
    IdentityInit(String),
}

/// Wizard store backed by the state file, restored from its last snapshot.
pub async fn wire_signup_store(paths: &AppPaths) -> Arc<SignupFormStore> {
    let persistence: Arc<dyn SignupFormStatePort> = Arc::new(
        FileSignupFormStateRepository::new(paths.signup_state_path.clone()),
    );
    SignupFormStore::restore(persistence).await.arc()
}

/// Session store backed by the session file.
pub fn wire_session_store(paths: &AppPaths) -> Arc<dyn AuthSessionPort> {
    Arc::new(FileAuthSessionRepository::new(paths.auth_session_path.clone()))
}

pub fn wire_identity(config: &AppConfig) -> WiringResult<Arc<dyn IdentityPort>> {
    let client = SupabaseAuthClient::from_config(config)
        .map_err(|e| WiringError::IdentityInit(format!("{e:#}")))?;
    Ok(Arc::new(client))
}

pub fn wire_navigator(
    store: Arc<SignupFormStore>,
    identity: Arc<dyn IdentityPort>,
    sessions: Arc<dyn AuthSessionPort>,
) -> StepNavigator {
    let submission = Arc::new(
        SubmissionCoordinator::new(identity, store.clone()).with_session_store(sessions),
    );
    StepNavigator::new(store, submission)
}

pub struct AuthUseCases {
    pub login: LoginWithPassword,
    pub current_session: CurrentSession,
    pub sign_out: SignOut,
}

pub fn wire_auth(
    identity: Arc<dyn IdentityPort>,
    sessions: Arc<dyn AuthSessionPort>,
) -> AuthUseCases {
    AuthUseCases {
        login: LoginWithPassword::new(identity.clone(), sessions.clone()),
        current_session: CurrentSession::new(identity.clone(), sessions.clone()),
        sign_out: SignOut::new(identity, sessions),
    }
}
