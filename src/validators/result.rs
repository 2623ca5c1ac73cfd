//! Validation result and error types

use serde::{Deserialize, Serialize};

/// Result of running one rule against a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleOutcome {
    /// The rule passed
    Valid,

    /// The rule failed; carries the user-visible message
    Invalid { message: String },

    /// The rule does not apply to this field right now
    ///
    /// Used by grouped rules so that only the first member of a name group
    /// computes the result once; no error and no valid mark is produced.
    NotApplicable,

    /// The verdict depends on an out-of-process check
    ///
    /// Carries the remote descriptor key; resolution happens later in the
    /// remote validation cache.
    Defer { descriptor: String },
}

impl RuleOutcome {
    /// Shorthand for a failing outcome
    pub fn invalid(message: impl Into<String>) -> Self {
        RuleOutcome::Invalid { message: message.into() }
    }

    #[allow(dead_code)]
    pub fn is_valid(&self) -> bool {
        matches!(self, RuleOutcome::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, RuleOutcome::Invalid { .. })
    }
}

/// Error type for validation failures that are not rule violations
///
/// Rule violations are user-visible messages carried by
/// [`RuleOutcome::Invalid`]; these errors surface to the caller instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A referenced custom validator key is missing, or a rule argument is
    /// unusable (validator misconfigured)
    ConfigError(String),

    /// A remote check could not complete (connection error or HTTP failure)
    Transport {
        field: String,
        message: String,
    },

    /// Unexpected engine behavior
    RuntimeError(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            ValidationError::Transport { field, message } => {
                write!(f, "Remote check failed for field ({}): {}", field, message)
            }
            ValidationError::RuntimeError(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}
