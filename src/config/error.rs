//! Configuration error types

use thiserror::Error;

/// Errors loading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors validating configuration values
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_names_the_variable() {
        let err = ValidationError::MissingRequired("AI__OPENAI_API_KEY");
        assert_eq!(
            err.to_string(),
            "missing required configuration: AI__OPENAI_API_KEY"
        );
    }

    #[test]
    fn invalid_value_names_field_and_reason() {
        let err = ValidationError::InvalidValue {
            field: "agent.user_id",
            reason: "must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration value for agent.user_id: must not be empty"
        );
    }
}
