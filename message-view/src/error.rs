//! Error types for HTTP message parsing

use thiserror::Error;

/// Errors raised while decomposing a raw request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty request")]
    EmptyRequest,

    #[error("Invalid request line: {line:?}")]
    InvalidRequestLine { line: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ParseError {
    /// Create an invalid request line error
    pub fn request_line(line: &str) -> Self {
        Self::InvalidRequestLine {
            line: line.to_string(),
        }
    }

    /// Create an invalid URL error
    pub fn url(url: &str, reason: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}
