//! File-based signup form state repository
//!
//! Persists the wizard snapshot as a JSON file in the application data
//! directory, wrapped in a versioned envelope:
//!
//! ```json
//! {"state": {"currentStep": 1, "formData": {...}}, "version": 0}
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use jams_core::ports::{SignupFormStatePort, SIGNUP_FORM_STORAGE_KEY};
use jams_core::signup::SignupFormState;

pub const SIGNUP_FORM_STATE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedEnvelope {
    state: SignupFormState,
    #[serde(default)]
    version: u32,
}

pub struct FileSignupFormStateRepository {
    state_file_path: PathBuf,
}

impl FileSignupFormStateRepository {
    /// Create repository with custom file path
    pub fn new(state_file_path: PathBuf) -> Self {
        Self { state_file_path }
    }

    /// Create repository storing `signup-form-storage.json` under `base_dir`
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            state_file_path: base_dir.join(format!("{SIGNUP_FORM_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.state_file_path
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.state_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SignupFormStatePort for FileSignupFormStateRepository {
    async fn load(&self) -> anyhow::Result<Option<SignupFormState>> {
        if !self.state_file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.state_file_path).await?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let envelope: PersistedEnvelope = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse signup form state: {}", e))?;

        if envelope.version != SIGNUP_FORM_STATE_VERSION {
            anyhow::bail!(
                "Unsupported signup form state version: {}",
                envelope.version
            );
        }

        debug!(path = %self.state_file_path.display(), "loaded signup form state");
        Ok(Some(envelope.state))
    }

    async fn save(&self, state: &SignupFormState) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let envelope = PersistedEnvelope {
            state: state.clone(),
            version: SIGNUP_FORM_STATE_VERSION,
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| anyhow::anyhow!("Failed to serialize signup form state: {}", e))?;

        let mut file = fs::File::create(&self.state_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create state file: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write state file: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync state file: {}", e))?;

        Ok(())
    }
}
