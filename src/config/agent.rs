//! Agent configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Agent configuration: whose twin to run and where profiles live
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// User whose profile drives the persona
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Directory of extracted profile JSON files
    #[serde(default = "default_profile_dir")]
    pub profile_dir: String,
}

impl AgentConfig {
    /// Validate agent configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "agent.user_id",
                reason: "must not be empty".to_string(),
            });
        }
        if self.profile_dir.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "agent.profile_dir",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            profile_dir: default_profile_dir(),
        }
    }
}

fn default_user_id() -> String {
    "demo_user_001".to_string()
}

fn default_profile_dir() -> String {
    "./profiles".to_string()
}
