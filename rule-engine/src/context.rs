//! Request context handed to the condition engine

use crate::error::{RuleError, RuleResult};
use crate::scope::ScopeClassifier;
use message_view::{HttpMessage, HttpService, MessageParser};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Tool of the host application that produced a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    Suite,
    Target,
    Proxy,
    Spider,
    Scanner,
    Intruder,
    Repeater,
    Sequencer,
    Decoder,
    Comparer,
    Extender,
}

impl ToolType {
    pub const ALL: [ToolType; 11] = [
        ToolType::Suite,
        ToolType::Target,
        ToolType::Proxy,
        ToolType::Spider,
        ToolType::Scanner,
        ToolType::Intruder,
        ToolType::Repeater,
        ToolType::Sequencer,
        ToolType::Decoder,
        ToolType::Comparer,
        ToolType::Extender,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolType::Suite => "Suite",
            ToolType::Target => "Target",
            ToolType::Proxy => "Proxy",
            ToolType::Spider => "Spider",
            ToolType::Scanner => "Scanner",
            ToolType::Intruder => "Intruder",
            ToolType::Repeater => "Repeater",
            ToolType::Sequencer => "Sequencer",
            ToolType::Decoder => "Decoder",
            ToolType::Comparer => "Comparer",
            ToolType::Extender => "Extender",
        }
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolType::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RuleError::configuration("tool", &format!("unknown tool '{}'", s)))
    }
}

/// Everything a condition may look at for one intercepted request
pub struct RequestContext<'a> {
    /// Raw request bytes
    pub request: &'a [u8],
    /// Raw response bytes, when the exchange already has one
    pub response: Option<&'a [u8]>,
    /// Declared service the request is sent to
    pub service: &'a HttpService,
    /// Analyzed view of `request`
    pub analyzed: HttpMessage,
    /// Absolute URL of the request
    pub url: Url,
    /// Tool that produced the request
    pub tool: ToolType,
    /// Scope membership query
    pub scope: &'a dyn ScopeClassifier,
}

impl<'a> RequestContext<'a> {
    /// Analyze `request` and bundle it with its metadata
    pub fn new(
        request: &'a [u8],
        service: &'a HttpService,
        tool: ToolType,
        parser: &dyn MessageParser,
        scope: &'a dyn ScopeClassifier,
    ) -> RuleResult<Self> {
        let analyzed = parser.parse(request)?;
        let url = analyzed.url(service)?;

        Ok(Self {
            request,
            response: None,
            service,
            analyzed,
            url,
            tool,
            scope,
        })
    }

    pub fn with_response(mut self, response: &'a [u8]) -> Self {
        self.response = Some(response);
        self
    }
}

impl fmt::Debug for RequestContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_line", &self.analyzed.request_line)
            .field("url", &self.url.as_str())
            .field("service", self.service)
            .field("tool", &self.tool)
            .field("has_response", &self.response.is_some())
            .finish()
    }
}
