//! Rules and rule sets
//!
//! A rule pairs an ordered condition list with an ordered replacement chain.
//! A rule set runs its enabled rules in order; candidates produced by one
//! rule are fed into the next.

use crate::condition::{evaluate_all, Condition, ConditionSet};
use crate::context::RequestContext;
use crate::error::{RuleError, RuleResult};
use crate::replacement::{apply_chain, Replacement};
use message_view::MessageParser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub comment: String,
    #[serde(rename = "isEnabled", default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

fn default_enabled() -> bool {
    true
}

impl Rule {
    pub fn new(comment: &str) -> Self {
        Self {
            comment: comment.to_string(),
            enabled: true,
            conditions: Vec::new(),
            replacements: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacements.push(replacement);
        self
    }

    /// Compile every enabled condition and check every enabled replacement
    pub fn validate(&self) -> RuleResult<()> {
        ConditionSet::compile(&self.conditions)?;
        for replacement in self.replacements.iter().filter(|r| r.enabled) {
            replacement.validate()?;
        }
        Ok(())
    }

    /// Whether the rule's conditions hold for the request
    pub fn applies(&self, ctx: &RequestContext<'_>) -> RuleResult<bool> {
        evaluate_all(&self.conditions, ctx)
    }

    /// Run the replacement chain over one request
    pub fn apply(&self, request: &[u8], parser: &dyn MessageParser) -> RuleResult<Vec<Vec<u8>>> {
        apply_chain(&self.replacements, request, parser)
    }
}

/// Ordered collection of rules
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn from_json(text: &str) -> RuleResult<Self> {
        let set: RuleSet = serde_json::from_str(text)?;
        set.validate()?;
        Ok(set)
    }

    pub fn from_toml(text: &str) -> RuleResult<Self> {
        let set: RuleSet = toml::from_str(text)?;
        set.validate()?;
        Ok(set)
    }

    /// Load a rule set, picking the format from the file extension
    pub fn load(path: &Path) -> RuleResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let set = match extension.as_deref() {
            Some("json") => Self::from_json(&text)?,
            Some("toml") => Self::from_toml(&text)?,
            _ => {
                return Err(RuleError::configuration(
                    "rules",
                    &format!("unsupported rule file '{}', expected .json or .toml", path.display()),
                ))
            }
        };

        info!(path = %path.display(), rules = set.rules.len(), "Loaded rule set");
        Ok(set)
    }

    pub fn validate(&self) -> RuleResult<()> {
        for (index, rule) in self.rules.iter().enumerate().filter(|(_, r)| r.enabled) {
            rule.validate().map_err(|e| match e {
                RuleError::Configuration { component, reason } => RuleError::Configuration {
                    component: format!("rule {} ({})", index, component),
                    reason,
                },
                other => other,
            })?;
        }
        Ok(())
    }

    /// Enabled rules, in order
    pub fn enabled_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    /// Run every enabled rule whose conditions hold for `ctx`
    ///
    /// Applicability is decided on the intercepted request; replacements are
    /// chained across rules. Returns `[ctx.request]` when no rule applies.
    pub fn process(
        &self,
        ctx: &RequestContext<'_>,
        parser: &dyn MessageParser,
    ) -> RuleResult<Vec<Vec<u8>>> {
        let mut candidates = vec![ctx.request.to_vec()];

        for (index, rule) in self.enabled_rules().enumerate() {
            if !rule.applies(ctx)? {
                debug!(rule = index, comment = %rule.comment, "Rule does not apply");
                continue;
            }

            let mut next = Vec::with_capacity(candidates.len());
            for candidate in &candidates {
                next.extend(rule.apply(candidate, parser)?);
            }
            debug!(
                rule = index,
                comment = %rule.comment,
                candidates = next.len(),
                "Rule applied"
            );
            candidates = next;
        }

        Ok(candidates)
    }
}
