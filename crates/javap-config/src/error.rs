//! Error types for configuration loading.

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing environment configuration")]
    MissingEnv {
        /// Name of the missing variable.
        name: &'static str,
    },
    /// A variable was set to an unusable value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Variable name.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_constant() {
        assert_eq!(
            ConfigError::MissingEnv {
                name: "DATABASE_URL"
            }
            .to_string(),
            "missing environment configuration"
        );
        assert_eq!(
            ConfigError::invalid("JAVAP_HTTP_PORT", "abc", "not_a_number").to_string(),
            "invalid configuration field"
        );
    }
}
