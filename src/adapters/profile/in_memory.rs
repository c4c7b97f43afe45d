//! In-memory profile store for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::UserId;
use crate::domain::profile::Profile;
use crate::ports::{ProfileStore, ProfileStoreError};

/// Map-backed profile store.
///
/// Clones share the underlying map, so a store can be seeded in a test and
/// handed to the code under test.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile.
    pub fn insert(&self, user_id: UserId, profile: Profile) {
        self.profiles.write().unwrap().insert(user_id, profile);
    }

    /// Removes a profile, returning it if present.
    pub fn remove(&self, user_id: &UserId) -> Option<Profile> {
        self.profiles.write().unwrap().remove(user_id)
    }

    /// Returns the number of stored profiles.
    pub fn len(&self) -> usize {
        self.profiles.read().unwrap().len()
    }

    /// Returns true if no profiles are stored.
    pub fn is_empty(&self) -> bool {
        self.profiles.read().unwrap().is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileStoreError> {
        Ok(self.profiles.read().unwrap().get(user_id).cloned())
    }
}
