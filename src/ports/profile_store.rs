//! Profile Store Port - Interface for the external profile store.
//!
//! The store holds structured professional profiles produced by the
//! attribute-extraction pipeline. The core only reads; a missing profile is
//! a normal outcome (`Ok(None)`), not an error, and the caller degrades to a
//! generic persona.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::profile::Profile;

/// Port for reading profile snapshots.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profile for a user, or `None` if no profile is stored.
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<Profile>, ProfileStoreError>;
}

/// Profile store errors.
#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    /// Underlying storage could not be read.
    #[error("profile store I/O error: {0}")]
    Io(String),

    /// Stored profile data is malformed.
    #[error("profile data malformed: {0}")]
    Parse(String),
}

impl ProfileStoreError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_with_context() {
        assert_eq!(
            ProfileStoreError::io("disk on fire").to_string(),
            "profile store I/O error: disk on fire"
        );
        assert_eq!(
            ProfileStoreError::parse("bad json").to_string(),
            "profile data malformed: bad json"
        );
    }
}
