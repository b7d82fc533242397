//! File-based auth session repository
//!
//! Keeps the signed-in session in the application data directory:
//!
//! ```json
//! {"session": {"access_token": "...", "refresh_token": "...", "user": {...}}, "version": 0}
//! ```
//!
//! Signing out deletes the file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use jams_core::identity::AuthSession;
use jams_core::ports::{AuthSessionPort, AUTH_SESSION_STORAGE_KEY};

pub const AUTH_SESSION_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    session: AuthSession,
    #[serde(default)]
    version: u32,
}

pub struct FileAuthSessionRepository {
    session_file_path: PathBuf,
}

impl FileAuthSessionRepository {
    pub fn new(session_file_path: PathBuf) -> Self {
        Self { session_file_path }
    }

    /// Create repository storing `auth-session.json` under `base_dir`
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            session_file_path: base_dir.join(format!("{AUTH_SESSION_STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.session_file_path
    }
}

#[async_trait]
impl AuthSessionPort for FileAuthSessionRepository {
    async fn load(&self) -> anyhow::Result<Option<AuthSession>> {
        if !self.session_file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.session_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let persisted: PersistedSession = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse auth session: {}", e))?;

        if persisted.version != AUTH_SESSION_VERSION {
            anyhow::bail!("Unsupported auth session version: {}", persisted.version);
        }

        Ok(Some(persisted.session))
    }

    async fn save(&self, session: &AuthSession) -> anyhow::Result<()> {
        if let Some(parent) = self.session_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let persisted = PersistedSession {
            session: session.clone(),
            version: AUTH_SESSION_VERSION,
        };
        let json = serde_json::to_string_pretty(&persisted)
            .map_err(|e| anyhow::anyhow!("Failed to serialize auth session: {}", e))?;

        let mut file = fs::File::create(&self.session_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create session file: {}", e))?;
        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write session file: {}", e))?;
        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync session file: {}", e))?;

        debug!(path = %self.session_file_path.display(), "saved auth session");
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.session_file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::anyhow!("Failed to remove session file: {}", e)),
        }
    }
}
