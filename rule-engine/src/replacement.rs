//! Replacement Transformation Engine
//!
//! A `Replacement` names a transform family, what to match, what to put in
//! its place and how many occurrences to act on. Applying it to a request
//! always yields a non-empty candidate list: the input itself when the
//! replacement is disabled or nothing matched, otherwise one rebuilt request
//! per selection of occurrences.

use crate::error::{RuleError, RuleResult};
use crate::matcher::{compile_search_bytes, MatchSpec};
use crate::transform::{
    add_header, BodyTransform, FirstLineTransform, HeaderOp, HeaderTransform, ParamFamily,
    ParamOp, ParamTransform, RequestStringTransform,
};
use message_view::MessageParser;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Kind of transformation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReplacementType {
    RequestString,
    RequestHeader,
    RequestBody,
    RequestParamName,
    RequestParamValue,
    RequestCookieName,
    RequestCookieValue,
    RequestFirstLine,
    AddHeader,
    RemoveParameterByName,
    RemoveParameterByValue,
    RemoveCookieByName,
    RemoveCookieByValue,
    RemoveHeaderByName,
    RemoveHeaderByValue,
    MatchParamNameReplaceValue,
    MatchCookieNameReplaceValue,
    MatchHeaderNameReplaceValue,
}

impl ReplacementType {
    pub const ALL: [ReplacementType; 18] = [
        ReplacementType::RequestString,
        ReplacementType::RequestHeader,
        ReplacementType::RequestBody,
        ReplacementType::RequestParamName,
        ReplacementType::RequestParamValue,
        ReplacementType::RequestCookieName,
        ReplacementType::RequestCookieValue,
        ReplacementType::RequestFirstLine,
        ReplacementType::AddHeader,
        ReplacementType::RemoveParameterByName,
        ReplacementType::RemoveParameterByValue,
        ReplacementType::RemoveCookieByName,
        ReplacementType::RemoveCookieByValue,
        ReplacementType::RemoveHeaderByName,
        ReplacementType::RemoveHeaderByValue,
        ReplacementType::MatchParamNameReplaceValue,
        ReplacementType::MatchCookieNameReplaceValue,
        ReplacementType::MatchHeaderNameReplaceValue,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReplacementType::RequestString => "Request String",
            ReplacementType::RequestHeader => "Request Header",
            ReplacementType::RequestBody => "Request Body",
            ReplacementType::RequestParamName => "Request Param Name",
            ReplacementType::RequestParamValue => "Request Param Value",
            ReplacementType::RequestCookieName => "Request Cookie Name",
            ReplacementType::RequestCookieValue => "Request Cookie Value",
            ReplacementType::RequestFirstLine => "Request First Line",
            ReplacementType::AddHeader => "Add Header",
            ReplacementType::RemoveParameterByName => "Remove Parameter By Name",
            ReplacementType::RemoveParameterByValue => "Remove Parameter By Value",
            ReplacementType::RemoveCookieByName => "Remove Cookie By Name",
            ReplacementType::RemoveCookieByValue => "Remove Cookie By Value",
            ReplacementType::RemoveHeaderByName => "Remove Header By Name",
            ReplacementType::RemoveHeaderByValue => "Remove Header By Value",
            ReplacementType::MatchParamNameReplaceValue => "Match Param Name, Replace Value",
            ReplacementType::MatchCookieNameReplaceValue => "Match Cookie Name, Replace Value",
            ReplacementType::MatchHeaderNameReplaceValue => "Match Header Name, Replace Value",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Whether `which` affects the result
    pub fn uses_cardinality(&self) -> bool {
        !matches!(self, ReplacementType::AddHeader | ReplacementType::RequestBody)
    }
}

impl fmt::Display for ReplacementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for ReplacementType {
    type Error = RuleError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::from_label(&label).ok_or_else(|| {
            RuleError::configuration("replacement", &format!("unknown replacement type '{}'", label))
        })
    }
}

impl From<ReplacementType> for String {
    fn from(t: ReplacementType) -> Self {
        t.label().to_string()
    }
}

/// How many matching occurrences a replacement acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacementCount {
    First,
    All,
    AllPossibilities,
}

impl ReplacementCount {
    pub const ALL: [ReplacementCount; 3] = [
        ReplacementCount::First,
        ReplacementCount::All,
        ReplacementCount::AllPossibilities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReplacementCount::First => "Replace First",
            ReplacementCount::All => "Replace All",
            ReplacementCount::AllPossibilities => "Replace all possibilities",
        }
    }

    /// Case-insensitive lookup; `label()` stays the stored spelling
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for ReplacementCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stored `which` labels; unknown labels load as `None`
mod which_label {
    use super::ReplacementCount;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(which: &Option<ReplacementCount>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match which {
            Some(count) => serializer.serialize_str(count.label()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ReplacementCount>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().and_then(ReplacementCount::from_label))
    }
}

/// One transformation of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Replacement {
    #[serde(rename = "type")]
    pub replacement_type: ReplacementType,
    #[serde(rename = "match", default)]
    pub pattern: String,
    #[serde(default)]
    pub replace: String,
    #[serde(default, with = "which_label", skip_serializing_if = "Option::is_none")]
    pub which: Option<ReplacementCount>,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub is_regex_match: bool,
    #[serde(rename = "isEnabled", default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Replacement {
    /// Build an enabled replacement from stored labels
    ///
    /// An unknown `which` label is kept as `None` and rejected when applied.
    pub fn new(
        replacement_type: ReplacementType,
        pattern: &str,
        replace: &str,
        which: &str,
        comment: &str,
        is_regex_match: bool,
    ) -> Self {
        Self {
            replacement_type,
            pattern: pattern.to_string(),
            replace: replace.to_string(),
            which: ReplacementCount::from_label(which),
            comment: comment.to_string(),
            is_regex_match,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn set_which(&mut self, label: &str) {
        self.which = ReplacementCount::from_label(label);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check the count and compile the pattern without touching a request
    pub fn validate(&self) -> RuleResult<()> {
        if self.replacement_type.uses_cardinality() {
            self.cardinality()?;
        }
        match self.replacement_type {
            ReplacementType::AddHeader => {}
            ReplacementType::RequestString | ReplacementType::RequestFirstLine => {
                compile_search_bytes(&self.pattern)?;
            }
            _ => {
                self.match_spec().compile()?;
            }
        }
        Ok(())
    }

    fn match_spec(&self) -> MatchSpec {
        MatchSpec {
            pattern: self.pattern.clone(),
            is_regex: self.is_regex_match,
        }
    }

    fn cardinality(&self) -> RuleResult<ReplacementCount> {
        self.which.ok_or_else(|| {
            RuleError::configuration(
                "replacement",
                &format!("'{}' has no valid replacement count", self.replacement_type),
            )
        })
    }

    /// Apply to one request
    ///
    /// Returns `[request]` when disabled, when nothing matched, or when the
    /// request is a multipart form and the type edits URL/body parameters.
    pub fn apply(&self, request: &[u8], parser: &dyn MessageParser) -> RuleResult<Vec<Vec<u8>>> {
        if !self.enabled {
            return Ok(vec![request.to_vec()]);
        }

        let candidates = match self.transform(request, parser) {
            Ok(candidates) => candidates,
            Err(RuleError::UnsupportedInput { reason }) => {
                debug!(replacement_type = %self.replacement_type, %reason, "Request left unchanged");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        debug!(
            replacement_type = %self.replacement_type,
            which = ?self.which,
            candidates = candidates.len(),
            "Applied replacement"
        );

        if candidates.is_empty() {
            Ok(vec![request.to_vec()])
        } else {
            Ok(candidates)
        }
    }

    /// Candidate requests; empty when nothing matched
    fn transform(&self, request: &[u8], parser: &dyn MessageParser) -> RuleResult<Vec<Vec<u8>>> {
        use ParamFamily::{Cookie, UrlAndBody};

        let replace = self.replace.as_str();

        match self.replacement_type {
            ReplacementType::AddHeader => Ok(vec![add_header(request, replace, parser)?]),
            ReplacementType::RequestBody => {
                let matcher = self.match_spec().compile()?;
                let body = BodyTransform::new(&matcher, replace).apply(request, parser)?;
                Ok(body.into_iter().collect())
            }
            ReplacementType::RequestString => {
                let transform = RequestStringTransform::new(&self.pattern, replace)?;
                Ok(transform.apply(request, self.cardinality()?))
            }
            ReplacementType::RequestFirstLine => {
                let transform = FirstLineTransform::new(&self.pattern, replace)?;
                transform.apply(request, self.cardinality()?, parser)
            }

            ReplacementType::RequestHeader => self.headers(HeaderOp::ReplaceLine, request, parser),
            ReplacementType::RemoveHeaderByName => self.headers(HeaderOp::RemoveByName, request, parser),
            ReplacementType::RemoveHeaderByValue => {
                self.headers(HeaderOp::RemoveByValue, request, parser)
            }
            ReplacementType::MatchHeaderNameReplaceValue => {
                self.headers(HeaderOp::ReplaceValueByName, request, parser)
            }

            ReplacementType::RequestParamName => self.params(UrlAndBody, ParamOp::ReplaceName, request, parser),
            ReplacementType::RequestParamValue => {
                self.params(UrlAndBody, ParamOp::ReplaceValue, request, parser)
            }
            ReplacementType::RemoveParameterByName => {
                self.params(UrlAndBody, ParamOp::RemoveByName, request, parser)
            }
            ReplacementType::RemoveParameterByValue => {
                self.params(UrlAndBody, ParamOp::RemoveByValue, request, parser)
            }
            ReplacementType::MatchParamNameReplaceValue => {
                self.params(UrlAndBody, ParamOp::ReplaceValueByName, request, parser)
            }

            ReplacementType::RequestCookieName => self.params(Cookie, ParamOp::ReplaceName, request, parser),
            ReplacementType::RequestCookieValue => self.params(Cookie, ParamOp::ReplaceValue, request, parser),
            ReplacementType::RemoveCookieByName => self.params(Cookie, ParamOp::RemoveByName, request, parser),
            ReplacementType::RemoveCookieByValue => {
                self.params(Cookie, ParamOp::RemoveByValue, request, parser)
            }
            ReplacementType::MatchCookieNameReplaceValue => {
                self.params(Cookie, ParamOp::ReplaceValueByName, request, parser)
            }
        }
    }

    fn headers(
        &self,
        op: HeaderOp,
        request: &[u8],
        parser: &dyn MessageParser,
    ) -> RuleResult<Vec<Vec<u8>>> {
        let which = self.cardinality()?;
        let matcher = self.match_spec().compile()?;
        HeaderTransform::new(op, &matcher, &self.replace).apply(request, which, parser)
    }

    fn params(
        &self,
        family: ParamFamily,
        op: ParamOp,
        request: &[u8],
        parser: &dyn MessageParser,
    ) -> RuleResult<Vec<Vec<u8>>> {
        let which = self.cardinality()?;
        let matcher = self.match_spec().compile()?;
        ParamTransform::new(family, op, &matcher, &self.replace).apply(request, which, parser)
    }
}

/// Feed every candidate of each replacement into the next one
///
/// Candidate order is preserved: the outputs of the first input come before
/// the outputs of the second.
pub fn apply_chain(
    replacements: &[Replacement],
    request: &[u8],
    parser: &dyn MessageParser,
) -> RuleResult<Vec<Vec<u8>>> {
    let mut candidates = vec![request.to_vec()];

    for replacement in replacements {
        let mut next = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            next.extend(replacement.apply(candidate, parser)?);
        }
        candidates = next;
    }

    Ok(candidates)
}
