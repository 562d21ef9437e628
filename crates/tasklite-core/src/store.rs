use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Credential store IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize credentials: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Could not determine a config directory")]
    NoConfigDir,
}

/// The persisted session: one bearer token and its user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub user_id: String,
}

/// Single-slot credential file under the per-user config directory.
/// One credential set per profile; saving overwrites unconditionally.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new() -> Result<Self, StoreError> {
        let path = default_auth_path().ok_or(StoreError::NoConfigDir)?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string(credential)?;
        fs::write(&self.path, body)?;

        // Confidentiality relies on the permission bits alone.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        debug!(path = ?self.path, "wrote credential file");
        Ok(())
    }

    /// A missing file and a malformed file read the same: no credential.
    pub fn load(&self) -> Option<Credential> {
        let text = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&text).ok()
    }

    /// Clearing an already-absent credential is a no-op success.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

pub fn default_auth_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("TASKLITE_CONFIG_DIR") {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join("auth.json"));
        }
    }
    dirs::config_dir().map(|dir| dir.join("tasklite").join("auth.json"))
}
