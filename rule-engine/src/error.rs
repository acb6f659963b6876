//! Error types for the rule engine

use message_view::ParseError;
use thiserror::Error;

/// Main error type for condition evaluation and replacement application
#[derive(Debug, Error, Clone)]
pub enum RuleError {
    #[error("Configuration error: {component} - {reason}")]
    Configuration { component: String, reason: String },

    #[error("Invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Unsupported input: {reason}")]
    UnsupportedInput { reason: String },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("I/O error: {details}")]
    Io { details: String },

    #[error("Serialization error: {error}")]
    Serialization { error: String },
}

impl RuleError {
    /// Create a configuration error
    pub fn configuration(component: &str, reason: &str) -> Self {
        Self::Configuration {
            component: component.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a pattern error from a failed regex compilation
    pub fn pattern(pattern: &str, error: &regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an unsupported input error
    pub fn unsupported(reason: &str) -> Self {
        Self::UnsupportedInput {
            reason: reason.to_string(),
        }
    }

    /// Get error category for grouping and filtering
    pub fn category(&self) -> ErrorCategory {
        match self {
            RuleError::Configuration { .. } => ErrorCategory::Configuration,
            RuleError::Pattern { .. } => ErrorCategory::Configuration,
            RuleError::Serialization { .. } => ErrorCategory::Configuration,

            RuleError::UnsupportedInput { .. } => ErrorCategory::Input,
            RuleError::Parse(_) => ErrorCategory::Input,

            RuleError::Io { .. } => ErrorCategory::Infrastructure,
        }
    }

    /// Whether the caller should fix the rule rather than the request
    pub fn is_configuration(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}

/// Error categories for grouping and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rule definition is invalid
    Configuration,
    /// Request could not be handled
    Input,
    /// Reading rule or config files failed
    Infrastructure,
}

impl From<serde_json::Error> for RuleError {
    fn from(error: serde_json::Error) -> Self {
        RuleError::Serialization {
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for RuleError {
    fn from(error: toml::de::Error) -> Self {
        RuleError::Serialization {
            error: error.to_string(),
        }
    }
}

impl From<std::io::Error> for RuleError {
    fn from(error: std::io::Error) -> Self {
        RuleError::Io {
            details: error.to_string(),
        }
    }
}

/// Result type for rule engine operations
pub type RuleResult<T> = Result<T, RuleError>;
