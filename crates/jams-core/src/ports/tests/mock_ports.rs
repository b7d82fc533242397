//! Mock implementations of the storage ports using `mockall`.
//!
//! The identity mock lives with the use cases that script it.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;

use crate::identity::{AuthSession, AuthUser};
use crate::ports::{AuthSessionPort, SignupFormStatePort};
use crate::signup::{FormStep, SignupFormState};

mock! {
    pub FormState {}

    #[async_trait]
    impl SignupFormStatePort for FormState {
        async fn load(&self) -> anyhow::Result<Option<SignupFormState>>;
        async fn save(&self, state: &SignupFormState) -> anyhow::Result<()>;
    }
}

mock! {
    pub SessionStore {}

    #[async_trait]
    impl AuthSessionPort for SessionStore {
        async fn load(&self) -> anyhow::Result<Option<AuthSession>>;
        async fn save(&self, session: &AuthSession) -> anyhow::Result<()>;
        async fn clear(&self) -> anyhow::Result<()>;
    }
}

fn session() -> AuthSession {
    AuthSession {
        access_token: "access-123".into(),
        refresh_token: "refresh-123".into(),
        token_type: "bearer".into(),
        expires_in: 3600,
        user: AuthUser {
            id: "user-123".into(),
            email: Some("john.doe@example.com".into()),
            user_metadata: serde_json::Value::Null,
            created_at: None,
        },
    }
}

#[tokio::test]
async fn form_state_port_is_usable_as_trait_object() {
    let mut store = MockFormState::new();
    store.expect_load().times(1).returning(|| {
        Ok(Some(SignupFormState {
            current_step: FormStep::School,
            ..SignupFormState::default()
        }))
    });
    store
        .expect_save()
        .withf(|state| state.current_step == FormStep::Phone)
        .times(1)
        .returning(|_| Ok(()));

    let port: Arc<dyn SignupFormStatePort> = Arc::new(store);
    let mut state = port.load().await.unwrap().expect("snapshot");
    state.current_step = state.current_step.next();
    port.save(&state).await.unwrap();
}

#[tokio::test]
async fn session_port_is_usable_as_trait_object() {
    let mut store = MockSessionStore::new();
    store.expect_load().times(1).returning(|| Ok(Some(session())));
    store.expect_clear().times(1).returning(|| Ok(()));
    store.expect_save().times(0);

    let port: Arc<dyn AuthSessionPort> = Arc::new(store);
    let loaded = port.load().await.unwrap().expect("session");
    assert_eq!(loaded.user.id, "user-123");
    port.clear().await.unwrap();
}
