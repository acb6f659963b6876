//! Rule Engine - condition evaluation and request rewriting for intercepted HTTP traffic
//!
//! This crate decides whether a rule applies to an intercepted request and
//! rewrites the request according to the rule's replacements:
//! - `condition` - typed predicates folded left to right with And/Or
//! - `replacement` - typed rewrites with first/all/all-possibilities cardinality
//! - `subset` - enumeration of every non-empty subset of matching occurrences
//! - `rule` - rules and rule sets chaining candidates across replacements

pub mod condition;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod replacement;
pub mod rule;
pub mod scope;
pub mod subset;
pub mod transform;


pub use condition::{
    evaluate_all, BooleanOperator, CompiledCondition, Condition, ConditionSet, MatchType,
    Predicate, ToolSelector,
};
pub use config::EngineConfig;
pub use context::{RequestContext, ToolType};
pub use error::{ErrorCategory, RuleError, RuleResult};
pub use logging::{init_logging, LoggingConfig};
pub use matcher::{matches, MatchSpec, Matcher};
pub use replacement::{apply_chain, Replacement, ReplacementCount, ReplacementType};
pub use rule::{Rule, RuleSet};
pub use scope::{ScopeClassifier, ScopeMatcher};
pub use subset::{apply_subsets, matching_positions, Subsets};

pub use message_view::{HttpMessage, HttpService, MessageParser, Parameter, ParameterKind, RawMessageParser};
