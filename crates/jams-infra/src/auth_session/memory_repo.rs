use async_trait::async_trait;
use tokio::sync::RwLock;

use jams_core::identity::AuthSession;
use jams_core::ports::AuthSessionPort;

/// Keeps the session in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryAuthSessionRepository {
    session: RwLock<Option<AuthSession>>,
}

impl InMemoryAuthSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl AuthSessionPort for InMemoryAuthSessionRepository {
    async fn load(&self) -> anyhow::Result<Option<AuthSession>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &AuthSession) -> anyhow::Result<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jams_core::identity::AuthUser;

    #[tokio::test]
    async fn save_then_clear() {
        let repo = InMemoryAuthSessionRepository::new();
        assert!(repo.load().await.unwrap().is_none());

        let session = AuthSession {
            access_token: "access-123".into(),
            refresh_token: "refresh-123".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            user: AuthUser {
                id: "user-123".into(),
                email: None,
                user_metadata: serde_json::Value::Null,
                created_at: None,
            },
        };
        repo.save(&session).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(session));

        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }
}
