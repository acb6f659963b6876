//! Scope classification for the "URL Is In Scope" condition

use serde::{Deserialize, Serialize};
use url::Url;
use wildmatch::WildMatch;

/// Answers whether a URL belongs to the target scope
pub trait ScopeClassifier: Send + Sync {
    fn is_in_scope(&self, url: &Url) -> bool;
}

impl<F> ScopeClassifier for F
where
    F: Fn(&Url) -> bool + Send + Sync,
{
    fn is_in_scope(&self, url: &Url) -> bool {
        self(url)
    }
}

/// Host wildcard scope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeMatcher {
    /// Only these hosts are in scope (Whitelist)
    /// Examples: ["*.example.com", "api.target.com"]
    #[serde(default)]
    pub include: Vec<String>,

    /// These hosts are never in scope (Blacklist)
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ScopeMatcher {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Check if a host is in scope
    ///
    /// Logic:
    /// 1. If exclude matches, return false (explicit deny).
    /// 2. If include is empty, return true (everything else is in scope).
    /// 3. Otherwise return true only if include matches.
    pub fn is_host_in_scope(&self, host: &str) -> bool {
        if self.exclude.iter().any(|p| WildMatch::new(p).matches(host)) {
            return false;
        }

        if self.include.is_empty() {
            return true;
        }

        self.include.iter().any(|p| WildMatch::new(p).matches(host))
    }
}

impl ScopeClassifier for ScopeMatcher {
    fn is_in_scope(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => self.is_host_in_scope(host),
            None => false,
        }
    }
}
