use async_trait::async_trait;
use tokio::sync::RwLock;

use jams_core::ports::SignupFormStatePort;
use jams_core::signup::SignupFormState;

/// Keeps the snapshot in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct InMemorySignupFormStateRepository {
    state: RwLock<Option<SignupFormState>>,
}

impl InMemorySignupFormStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SignupFormState) -> Self {
        Self {
            state: RwLock::new(Some(state)),
        }
    }
}

#[async_trait]
impl SignupFormStatePort for InMemorySignupFormStateRepository {
    async fn load(&self) -> anyhow::Result<Option<SignupFormState>> {
        Ok(self.state.read().await.clone())
    }

    async fn save(&self, state: &SignupFormState) -> anyhow::Result<()> {
        *self.state.write().await = Some(state.clone());
        Ok(())
    }
}
