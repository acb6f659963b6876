//! Literal/regex string matching shared by both engines
//!
//! A value matches when it equals the pattern exactly, or when regex mode is
//! on and the pattern matches the whole value. Regex mode adds to the
//! equality check, it never replaces it.

use crate::error::{RuleError, RuleResult};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern plus literal/regex flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpec {
    pub pattern: String,
    pub is_regex: bool,
}

impl MatchSpec {
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            is_regex: false,
        }
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            is_regex: true,
        }
    }

    /// Compile the pattern so it can be applied to many values
    pub fn compile(&self) -> RuleResult<Matcher> {
        let regex = if self.is_regex {
            Some(compile_full_match(&self.pattern)?)
        } else {
            None
        };

        Ok(Matcher {
            pattern: self.pattern.clone(),
            regex,
        })
    }
}

/// Compiled `MatchSpec`
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex: Option<Regex>,
}

impl Matcher {
    /// Check a single value
    pub fn is_match(&self, value: &str) -> bool {
        value == self.pattern || self.regex.as_ref().is_some_and(|re| re.is_match(value))
    }
}

/// Check `value` against the pattern in `spec`
pub fn matches(value: &str, spec: &MatchSpec) -> RuleResult<bool> {
    Ok(spec.compile()?.is_match(value))
}

/// Compile a regex that must match the entire examined value
pub fn compile_full_match(pattern: &str) -> RuleResult<Regex> {
    Regex::new(&format!(r"\A(?:{})\z", pattern)).map_err(|e| RuleError::pattern(pattern, &e))
}

/// Compile a regex used for searching inside a value
pub fn compile_search(pattern: &str) -> RuleResult<Regex> {
    Regex::new(pattern).map_err(|e| RuleError::pattern(pattern, &e))
}

/// Byte-oriented variant of `compile_search`
pub fn compile_search_bytes(pattern: &str) -> RuleResult<regex::bytes::Regex> {
    regex::bytes::Regex::new(pattern).map_err(|e| RuleError::pattern(pattern, &e))
}
