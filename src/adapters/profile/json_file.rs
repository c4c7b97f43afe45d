//! JSON-file profile store.
//!
//! Reads one JSON document per user from a base directory:
//! `{base_dir}/{user_id}.json`. This is the hand-off format written by the
//! attribute-extraction pipeline (profile scraping, resume parsing); the
//! conversation core only ever reads it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::UserId;
use crate::domain::profile::Profile;
use crate::ports::{ProfileStore, ProfileStoreError};

/// Filesystem-backed profile store.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    base_dir: PathBuf,
}

impl JsonFileProfileStore {
    /// Creates a store reading from the given base directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Full path to a user's profile file.
    fn profile_path(&self, user_id: &UserId) -> PathBuf {
        self.base_dir.join(format!("{}.json", user_id.as_str()))
    }
}

#[async_trait]
impl ProfileStore for JsonFileProfileStore {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileStoreError> {
        let path = self.profile_path(user_id);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ProfileStoreError::io(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let profile = serde_json::from_str(&raw).map_err(|e| {
            ProfileStoreError::parse(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!(%user_id, path = %path.display(), "profile loaded");
        Ok(Some(profile))
    }
}
