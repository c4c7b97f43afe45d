//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `TWINLINK` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use twinlink::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Running as {}", config.agent.user_id);
//! ```

mod agent;
mod ai;
mod error;

pub use agent::AgentConfig;
pub use ai::{AiConfig, AiProviderKind};
pub use error::{ConfigError, ValidationError};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Agent configuration (user, profile directory)
    #[serde(default)]
    pub agent: AgentConfig,

    /// AI provider configuration
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `TWINLINK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `TWINLINK__AGENT__USER_ID=alex_001` -> `agent.user_id = alex_001`
    /// - `TWINLINK__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TWINLINK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.agent.validate()?;
        self.ai.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("TWINLINK__AGENT__USER_ID");
        env::remove_var("TWINLINK__AGENT__PROFILE_DIR");
        env::remove_var("TWINLINK__AI__PROVIDER");
        env::remove_var("TWINLINK__AI__OPENAI_API_KEY");
        env::remove_var("TWINLINK__AI__MODEL");
    }

    #[test]
    fn loads_defaults_without_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.agent.user_id, "demo_user_001");
        assert_eq!(config.ai.provider, AiProviderKind::OpenAI);
        assert_eq!(config.ai.model, "gpt-3.5-turbo");
    }

    #[test]
    fn reads_nested_values_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TWINLINK__AGENT__USER_ID", "alex_001");
        env::set_var("TWINLINK__AI__PROVIDER", "mock");
        let config = AppConfig::load();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.agent.user_id, "alex_001");
        assert_eq!(config.ai.provider, AiProviderKind::Mock);
    }

    #[test]
    fn validates_full_config_with_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("TWINLINK__AI__OPENAI_API_KEY", "sk-test");
        let config = AppConfig::load();
        clear_env();

        assert!(config.unwrap().validate().is_ok());
    }

    #[test]
    fn default_config_fails_validation_without_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();
        assert!(config.validate().is_err());
    }
}
