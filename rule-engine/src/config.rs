//! Configuration types and utilities

use crate::error::RuleResult;
use crate::logging::LoggingConfig;
use crate::rule::RuleSet;
use crate::scope::ScopeMatcher;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Engine configuration, read from a TOML file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Hosts the "URL Is In Scope" condition accepts
    pub scope: ScopeMatcher,
    /// Rule set file (`.json` or `.toml`); relative paths are resolved
    /// against the directory of the config file
    pub rules: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> RuleResult<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.logging.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> RuleResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&text)?;

        if let (Some(rules), Some(dir)) = (config.rules.as_ref(), path.parent()) {
            if rules.is_relative() {
                config.rules = Some(dir.join(rules));
            }
        }

        debug!(path = %path.display(), rules = ?config.rules, "Loaded engine config");
        Ok(config)
    }

    /// Load the configured rule set; no rule file means no rules
    pub fn load_rules(&self) -> RuleResult<RuleSet> {
        match &self.rules {
            Some(path) => RuleSet::load(path),
            None => Ok(RuleSet::default()),
        }
    }
}
