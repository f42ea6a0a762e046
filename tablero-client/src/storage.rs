//! Durable local storage for credentials
//!
//! The durable state is a pair of sibling files, `token` (the raw bearer
//! string) and `usuario` (the serialized user record), under the platform
//! data directory. The pair is written together, read together, and
//! cleared together, never independently: a half-present or unparseable
//! pair is reported as [`StorageError::Malformed`] so the caller can treat
//! it like a failed verification.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tablero_model::User;

use crate::errors::StorageError;

pub(crate) const TOKEN_FILE: &str = "token";
pub(crate) const USER_FILE: &str = "usuario";

/// The stored pair, as read back from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCredentials {
    /// Raw bearer string
    pub token: String,
    /// The user record that was current when the pair was written
    pub user: User,
}

/// Local storage for the credential pair
#[derive(Debug)]
pub struct CredentialStore {
    root: PathBuf,
}

impl CredentialStore {
    /// Create a store rooted at the platform data directory.
    pub fn new() -> Result<Self, StorageError> {
        let proj_dirs = ProjectDirs::from("", "tablero", "tablero-admin").ok_or_else(|| {
            StorageError::InitFailed("Unable to determine data directory".to_string())
        })?;
        Ok(Self {
            root: proj_dirs.data_dir().to_path_buf(),
        })
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.root.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.root.join(USER_FILE)
    }

    /// Whether a stored pair looks present (both files exist).
    pub fn has_credentials(&self) -> bool {
        self.token_path().exists() && self.user_path().exists()
    }

    /// Write the pair. Always writes both entries.
    pub async fn save(&self, token: &str, user: &User) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(StorageError::WriteFailed)?;

        let token_path = self.token_path();
        tokio::fs::write(&token_path, token)
            .await
            .map_err(StorageError::WriteFailed)?;
        restrict_permissions(&token_path).await?;

        let serialized = serde_json::to_string(user)
            .map_err(|e| StorageError::WriteFailed(std::io::Error::other(e)))?;
        tokio::fs::write(self.user_path(), serialized)
            .await
            .map_err(StorageError::WriteFailed)?;

        log::debug!("[CredentialStore] Saved credential pair to {:?}", self.root);
        Ok(())
    }

    /// Read the pair.
    ///
    /// `Ok(None)` when neither entry exists. [`StorageError::Malformed`]
    /// when only one exists, the token is empty, or the user record does
    /// not parse.
    pub async fn load(&self) -> Result<Option<StoredCredentials>, StorageError> {
        let token_path = self.token_path();
        let user_path = self.user_path();

        match (token_path.exists(), user_path.exists()) {
            (false, false) => return Ok(None),
            (true, true) => {}
            _ => {
                log::warn!("[CredentialStore] Credential pair is half-present");
                return Err(StorageError::Malformed);
            }
        }

        let token = tokio::fs::read_to_string(&token_path)
            .await
            .map_err(StorageError::ReadFailed)?;
        if token.trim().is_empty() {
            return Err(StorageError::Malformed);
        }

        let serialized = tokio::fs::read_to_string(&user_path)
            .await
            .map_err(StorageError::ReadFailed)?;
        let user: User = serde_json::from_str(&serialized).map_err(|e| {
            log::warn!("[CredentialStore] Stored user record does not parse: {}", e);
            StorageError::Malformed
        })?;

        Ok(Some(StoredCredentials { token, user }))
    }

    /// Remove the pair. Idempotent; removing an absent pair succeeds.
    pub async fn clear(&self) -> Result<(), StorageError> {
        for path in [self.token_path(), self.user_path()] {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::WriteFailed(e)),
            }
        }
        log::debug!("[CredentialStore] Cleared credential pair");
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = tokio::fs::metadata(path)
        .await
        .map_err(StorageError::WriteFailed)?
        .permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms)
        .await
        .map_err(StorageError::WriteFailed)
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}
