//! Shared fakes for use case tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mockall::mock;

use jams_core::identity::{
    AuthError, AuthSession, AuthUser, Credentials, SignUpRequest, SignUpResponse,
};
use jams_core::ports::{AuthSessionPort, IdentityPort, SignupFormStatePort};
use jams_core::signup::{SignupFormData, SignupFormState};

mock! {
    pub Identity {}

    #[async_trait]
    impl IdentityPort for Identity {
        async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpResponse, AuthError>;
        async fn sign_in_with_password(&self, credentials: Credentials) -> Result<AuthSession, AuthError>;
        async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
        async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
    }
}

/// Keeps the last saved snapshot in memory.
#[derive(Default)]
pub struct InMemoryFormState {
    stored: Mutex<Option<SignupFormState>>,
}

impl InMemoryFormState {
    pub fn stored(&self) -> Option<SignupFormState> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignupFormStatePort for InMemoryFormState {
    async fn load(&self) -> anyhow::Result<Option<SignupFormState>> {
        Ok(self.stored())
    }

    async fn save(&self, state: &SignupFormState) -> anyhow::Result<()> {
        *self.stored.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

/// Keeps the signed-in session in memory.
#[derive(Default)]
pub struct InMemorySessions {
    stored: Mutex<Option<AuthSession>>,
}

impl InMemorySessions {
    pub fn holding(session: AuthSession) -> Self {
        Self {
            stored: Mutex::new(Some(session)),
        }
    }

    pub fn stored(&self) -> Option<AuthSession> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthSessionPort for InMemorySessions {
    async fn load(&self) -> anyhow::Result<Option<AuthSession>> {
        Ok(self.stored())
    }

    async fn save(&self, session: &AuthSession) -> anyhow::Result<()> {
        *self.stored.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

pub fn filled_form() -> SignupFormData {
    SignupFormData {
        name: "John Doe".into(),
        email: "john.doe@example.com".into(),
        password: "Password123!".into(),
        school: "University of Sydney".into(),
        phone_number: "0412345678".into(),
    }
}

pub fn user(email: &str) -> AuthUser {
    AuthUser {
        id: "user-123".into(),
        email: Some(email.to_string()),
        user_metadata: serde_json::Value::Null,
        created_at: None,
    }
}

pub fn session_for(email: &str) -> AuthSession {
    AuthSession {
        access_token: "access-token".into(),
        refresh_token: "refresh-token".into(),
        token_type: "bearer".into(),
        expires_in: 3600,
        user: user(email),
    }
}
