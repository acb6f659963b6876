//! Condition Evaluation Engine
//!
//! A `Condition` is one typed predicate over a request plus the boolean
//! operator that joins it to the condition before it. Conditions compile into
//! a closed `Predicate` set; a rule's applicability is the left-to-right fold
//! of its enabled conditions.

use crate::context::{RequestContext, ToolType};
use crate::error::{RuleError, RuleResult};
use crate::matcher::compile_full_match;
use message_view::ParameterKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{trace, warn};

/// Operator joining a condition to the result of the conditions before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BooleanOperator {
    #[default]
    And,
    Or,
    /// Empty operator, used by the first condition of a list
    None,
}

impl BooleanOperator {
    pub const OPTIONS: [&'static str; 2] = ["And", "Or"];

    pub fn label(&self) -> &'static str {
        match self {
            BooleanOperator::And => "And",
            BooleanOperator::Or => "Or",
            BooleanOperator::None => "",
        }
    }

    /// Parse an operator label, normalizing unknown labels to `And`
    pub fn normalize(label: &str) -> Self {
        match label.trim() {
            "" => BooleanOperator::None,
            l if l.eq_ignore_ascii_case("and") => BooleanOperator::And,
            l if l.eq_ignore_ascii_case("or") => BooleanOperator::Or,
            _ => BooleanOperator::And,
        }
    }
}

impl From<String> for BooleanOperator {
    fn from(label: String) -> Self {
        Self::normalize(&label)
    }
}

impl From<BooleanOperator> for String {
    fn from(op: BooleanOperator) -> Self {
        op.label().to_string()
    }
}

/// What part of the request a condition examines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchType {
    DomainName,
    Protocol,
    HttpMethod,
    Url,
    FileExtension,
    Request,
    CookieName,
    CookieValue,
    AnyHeader,
    RequestBody,
    ParamName,
    ParamValue,
    SentFromTool,
    ListenerPort,
}

const MATCHES: &[&str] = &["Matches", "Does Not Match"];

impl MatchType {
    pub const ALL: [MatchType; 14] = [
        MatchType::DomainName,
        MatchType::Protocol,
        MatchType::HttpMethod,
        MatchType::Url,
        MatchType::FileExtension,
        MatchType::Request,
        MatchType::CookieName,
        MatchType::CookieValue,
        MatchType::AnyHeader,
        MatchType::RequestBody,
        MatchType::ParamName,
        MatchType::ParamValue,
        MatchType::SentFromTool,
        MatchType::ListenerPort,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MatchType::DomainName => "Domain Name",
            MatchType::Protocol => "Protocol",
            MatchType::HttpMethod => "HTTP Method",
            MatchType::Url => "URL",
            MatchType::FileExtension => "File Extension",
            MatchType::Request => "Request",
            MatchType::CookieName => "Cookie Name",
            MatchType::CookieValue => "Cookie Value",
            MatchType::AnyHeader => "Any Header",
            MatchType::RequestBody => "Request Body",
            MatchType::ParamName => "Param Name",
            MatchType::ParamValue => "Param Value",
            MatchType::SentFromTool => "Sent From Tool",
            MatchType::ListenerPort => "Listener Port",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }

    /// Parse a label, falling back to `DomainName` for unknown labels
    pub fn normalize(label: &str) -> Self {
        Self::from_label(label).unwrap_or_else(|| {
            warn!(match_type = label, "Unknown match type, using Domain Name");
            MatchType::DomainName
        })
    }

    /// Relationships a condition of this type may use
    pub fn relationship_options(&self) -> &'static [&'static str] {
        match self {
            MatchType::Protocol => &["Is HTTP", "Is Not HTTP"],
            MatchType::Url => &["Matches", "Does Not Match", "Is In Scope"],
            MatchType::Request => &["Contains Parameters", "Does Not Contain Parameters"],
            MatchType::SentFromTool => &[
                "Burp", "Proxy", "Repeater", "Spider", "Intruder", "Scanner",
            ],
            MatchType::DomainName
            | MatchType::HttpMethod
            | MatchType::FileExtension
            | MatchType::CookieName
            | MatchType::CookieValue
            | MatchType::AnyHeader
            | MatchType::RequestBody
            | MatchType::ParamName
            | MatchType::ParamValue
            | MatchType::ListenerPort => MATCHES,
        }
    }

    /// Whether `match_condition` is consulted for this type
    pub fn is_editable(&self) -> bool {
        !matches!(
            self,
            MatchType::Protocol | MatchType::Request | MatchType::SentFromTool
        )
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for MatchType {
    fn from(label: String) -> Self {
        Self::normalize(&label)
    }
}

impl From<MatchType> for String {
    fn from(t: MatchType) -> Self {
        t.label().to_string()
    }
}

/// Tool set named by a "Sent From Tool" relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolSelector {
    /// Every tool except Extender and Scanner
    Burp,
    Proxy,
    Repeater,
    Spider,
    Intruder,
    Scanner,
}

impl ToolSelector {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Burp" => Some(ToolSelector::Burp),
            "Proxy" => Some(ToolSelector::Proxy),
            "Repeater" => Some(ToolSelector::Repeater),
            "Spider" => Some(ToolSelector::Spider),
            "Intruder" => Some(ToolSelector::Intruder),
            "Scanner" => Some(ToolSelector::Scanner),
            _ => None,
        }
    }

    pub fn accepts(&self, tool: ToolType) -> bool {
        match self {
            ToolSelector::Burp => tool != ToolType::Extender && tool != ToolType::Scanner,
            ToolSelector::Proxy => tool == ToolType::Proxy,
            ToolSelector::Repeater => tool == ToolType::Repeater,
            ToolSelector::Spider => tool == ToolType::Spider,
            ToolSelector::Intruder => tool == ToolType::Intruder,
            ToolSelector::Scanner => tool == ToolType::Scanner,
        }
    }
}

/// One predicate of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub boolean_operator: BooleanOperator,
    pub match_type: MatchType,
    pub match_relationship: String,
    #[serde(default)]
    pub match_condition: String,
    #[serde(rename = "isEnabled", default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Condition {
    pub fn new(
        boolean_operator: &str,
        match_type: &str,
        match_relationship: &str,
        match_condition: &str,
    ) -> Self {
        Self {
            boolean_operator: BooleanOperator::normalize(boolean_operator),
            match_type: MatchType::normalize(match_type),
            match_relationship: match_relationship.to_string(),
            match_condition: match_condition.to_string(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn set_boolean_operator(&mut self, label: &str) {
        self.boolean_operator = BooleanOperator::normalize(label);
    }

    pub fn set_match_type(&mut self, label: &str) {
        self.match_type = MatchType::normalize(label);
    }

    pub fn set_match_relationship(&mut self, relationship: &str) {
        self.match_relationship = relationship.to_string();
    }

    pub fn set_match_condition(&mut self, condition: &str) {
        self.match_condition = condition.to_string();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Validate the relationship and compile the predicate
    pub fn compile(&self) -> RuleResult<CompiledCondition> {
        let relationship = self.match_relationship.as_str();
        if !self.match_type.relationship_options().contains(&relationship) {
            return Err(RuleError::configuration(
                "condition",
                &format!(
                    "'{}' is not a relationship of '{}'",
                    relationship, self.match_type
                ),
            ));
        }

        let negated = matches!(
            relationship,
            "Does Not Match" | "Is Not HTTP" | "Does Not Contain Parameters"
        );
        let pattern = || compile_full_match(&self.match_condition);

        let predicate = match self.match_type {
            MatchType::DomainName => Predicate::DomainName(self.match_condition.clone()),
            MatchType::Protocol => Predicate::Protocol,
            MatchType::HttpMethod => Predicate::HttpMethod(pattern()?),
            MatchType::Url if relationship == "Is In Scope" => Predicate::UrlInScope,
            MatchType::Url => Predicate::Url(pattern()?),
            MatchType::FileExtension => Predicate::FileExtension(pattern()?),
            MatchType::Request => Predicate::HasParameters,
            MatchType::CookieName => Predicate::CookieName(pattern()?),
            MatchType::CookieValue => Predicate::CookieValue(pattern()?),
            MatchType::AnyHeader => Predicate::AnyHeader(pattern()?),
            MatchType::RequestBody => Predicate::RequestBody(pattern()?),
            MatchType::ParamName => Predicate::ParamName(pattern()?),
            MatchType::ParamValue => Predicate::ParamValue(pattern()?),
            MatchType::SentFromTool => {
                let selector = ToolSelector::from_label(relationship).ok_or_else(|| {
                    RuleError::configuration("condition", &format!("unknown tool '{}'", relationship))
                })?;
                Predicate::SentFromTool(selector)
            }
            MatchType::ListenerPort => {
                let port = self.match_condition.trim().parse::<u16>().map_err(|e| {
                    RuleError::configuration(
                        "condition",
                        &format!("invalid listener port '{}': {}", self.match_condition, e),
                    )
                })?;
                Predicate::ListenerPort(port)
            }
        };

        Ok(CompiledCondition {
            operator: self.boolean_operator,
            predicate,
            negated,
        })
    }

    /// Compile and evaluate against one request
    ///
    /// The enabled flag is not consulted here; lists skip disabled conditions.
    pub fn evaluate(&self, ctx: &RequestContext<'_>) -> RuleResult<bool> {
        Ok(self.compile()?.evaluate(ctx))
    }
}

/// Closed set of request predicates
#[derive(Debug, Clone)]
pub enum Predicate {
    DomainName(String),
    Protocol,
    HttpMethod(Regex),
    Url(Regex),
    UrlInScope,
    FileExtension(Regex),
    HasParameters,
    CookieName(Regex),
    CookieValue(Regex),
    AnyHeader(Regex),
    RequestBody(Regex),
    ParamName(Regex),
    ParamValue(Regex),
    SentFromTool(ToolSelector),
    ListenerPort(u16),
}

impl Predicate {
    fn test(&self, ctx: &RequestContext<'_>) -> bool {
        let msg = &ctx.analyzed;

        match self {
            Predicate::DomainName(host) => ctx.service.host == *host,
            Predicate::Protocol => ctx.service.is_http(),
            Predicate::HttpMethod(re) => re.is_match(msg.method()),
            Predicate::Url(re) => re.is_match(ctx.url.as_str()),
            Predicate::UrlInScope => ctx.scope.is_in_scope(&ctx.url),
            Predicate::FileExtension(re) => re.is_match(file_extension(ctx.url.path())),
            Predicate::HasParameters => msg
                .parameters
                .iter()
                .any(|p| matches!(p.kind, ParameterKind::Url | ParameterKind::Body)),
            Predicate::CookieName(re) => msg
                .parameters_of(ParameterKind::Cookie)
                .any(|p| re.is_match(&p.name)),
            Predicate::CookieValue(re) => msg
                .parameters_of(ParameterKind::Cookie)
                .any(|p| re.is_match(&p.value)),
            Predicate::AnyHeader(re) => msg.headers.iter().any(|h| re.is_match(h)),
            Predicate::RequestBody(re) => re.is_match(&msg.body_text()),
            Predicate::ParamName(re) => msg.parameters.iter().any(|p| re.is_match(&p.name)),
            Predicate::ParamValue(re) => msg.parameters.iter().any(|p| re.is_match(&p.value)),
            Predicate::SentFromTool(selector) => selector.accepts(ctx.tool),
            Predicate::ListenerPort(port) => ctx.service.port == *port,
        }
    }
}

/// Extension of the last path segment, without the dot
fn file_extension(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rfind('.') {
        Some(idx) => &file[idx + 1..],
        None => "",
    }
}

/// Condition ready for repeated evaluation
#[derive(Debug, Clone)]
pub struct CompiledCondition {
    pub operator: BooleanOperator,
    pub predicate: Predicate,
    pub negated: bool,
}

impl CompiledCondition {
    pub fn evaluate(&self, ctx: &RequestContext<'_>) -> bool {
        self.predicate.test(ctx) != self.negated
    }
}

/// Enabled conditions of a rule, compiled in order
#[derive(Debug, Clone, Default)]
pub struct ConditionSet {
    conditions: Vec<CompiledCondition>,
}

impl ConditionSet {
    /// Compile every enabled condition; disabled ones are dropped
    pub fn compile(conditions: &[Condition]) -> RuleResult<Self> {
        let conditions = conditions
            .iter()
            .filter(|c| c.enabled)
            .map(Condition::compile)
            .collect::<RuleResult<Vec<_>>>()?;

        Ok(Self { conditions })
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Left fold: the first result seeds the accumulator, each later
    /// condition joins with its own operator. An empty set is true.
    pub fn evaluate(&self, ctx: &RequestContext<'_>) -> bool {
        let mut conditions = self.conditions.iter();
        let Some(first) = conditions.next() else {
            return true;
        };

        let result = conditions.fold(first.evaluate(ctx), |acc, condition| {
            let value = condition.evaluate(ctx);
            match condition.operator {
                BooleanOperator::Or => acc || value,
                BooleanOperator::And | BooleanOperator::None => acc && value,
            }
        });

        trace!(conditions = self.len(), result, "Evaluated condition set");
        result
    }
}

/// Evaluate an ordered condition list against one request
pub fn evaluate_all(conditions: &[Condition], ctx: &RequestContext<'_>) -> RuleResult<bool> {
    Ok(ConditionSet::compile(conditions)?.evaluate(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::ScopeMatcher;
    use message_view::{HttpService, RawMessageParser};

    const FORM_POST: &[u8] = b"POST /account/update.php?id=7 HTTP/1.1\r\n\
        Host: shop.example.com\r\n\
        Cookie: session=abc123; theme=dark\r\n\
        Content-Type: application/x-www-form-urlencoded\r\n\
        Content-Length: 21\r\n\
        \r\n\
        email=a%40b.c&admin=0";

    const PLAIN_GET: &[u8] = b"GET /index.html HTTP/1.1\r\nHost: shop.example.com\r\n\r\n";

    fn eval_with(
        conditions: &[Condition],
        raw: &[u8],
        service: &HttpService,
        tool: ToolType,
    ) -> RuleResult<bool> {
        let scope = ScopeMatcher::new(vec!["*.example.com".to_string()], vec![]);
        let ctx = RequestContext::new(raw, service, tool, &RawMessageParser, &scope)?;
        evaluate_all(conditions, &ctx)
    }

    fn eval(condition: Condition, raw: &[u8]) -> bool {
        let service = HttpService::new("shop.example.com", 443, "https");
        eval_with(&[condition], raw, &service, ToolType::Proxy).unwrap()
    }

    fn cond(match_type: &str, relationship: &str, condition: &str) -> Condition {
        Condition::new("", match_type, relationship, condition)
    }

    #[test]
    fn test_domain_name_is_exact() {
        let condition = cond("Domain Name", "Matches", "example.com");
        let exact = HttpService::new("example.com", 80, "http");
        let sub = HttpService::new("sub.example.com", 80, "http");

        assert!(eval_with(&[condition.clone()], PLAIN_GET, &exact, ToolType::Proxy).unwrap());
        assert!(!eval_with(&[condition], PLAIN_GET, &sub, ToolType::Proxy).unwrap());

        let negated = cond("Domain Name", "Does Not Match", "example.com");
        assert!(eval_with(&[negated], PLAIN_GET, &sub, ToolType::Proxy).unwrap());
    }

    #[test]
    fn test_protocol() {
        assert!(!eval(cond("Protocol", "Is HTTP", ""), PLAIN_GET));
        assert!(eval(cond("Protocol", "Is Not HTTP", ""), PLAIN_GET));
    }

    #[test]
    fn test_http_method_and_url() {
        assert!(eval(cond("HTTP Method", "Matches", "POST|PUT"), FORM_POST));
        assert!(!eval(cond("HTTP Method", "Matches", "POS"), FORM_POST));
        assert!(eval(cond("HTTP Method", "Does Not Match", "GET"), FORM_POST));

        assert!(eval(cond("URL", "Matches", r"https://shop\.example\.com/account/.*"), FORM_POST));
        assert!(!eval(cond("URL", "Matches", "/account/.*"), FORM_POST));
        assert!(eval(cond("URL", "Is In Scope", ""), FORM_POST));
    }

    #[test]
    fn test_url_out_of_scope() {
        let service = HttpService::new("other.test", 80, "http");
        let result = eval_with(&[cond("URL", "Is In Scope", "")], PLAIN_GET, &service, ToolType::Proxy);
        assert!(!result.unwrap());
    }

    #[test]
    fn test_file_extension() {
        assert!(eval(cond("File Extension", "Matches", "php"), FORM_POST));
        assert!(eval(cond("File Extension", "Does Not Match", "js|css"), FORM_POST));
        assert_eq!(file_extension("/a/b.tar.gz"), "gz");
        assert_eq!(file_extension("/v1.2/users"), "");
        assert_eq!(file_extension("/"), "");
    }

    #[test]
    fn test_request_contains_parameters() {
        assert!(eval(cond("Request", "Contains Parameters", ""), FORM_POST));
        assert!(eval(cond("Request", "Does Not Contain Parameters", ""), PLAIN_GET));

        // Cookies alone do not count
        let cookie_only = b"GET / HTTP/1.1\r\nCookie: a=1\r\n\r\n";
        assert!(!eval(cond("Request", "Contains Parameters", ""), cookie_only));
    }

    #[test]
    fn test_cookie_name_and_value() {
        assert!(eval(cond("Cookie Name", "Matches", "sess.*"), FORM_POST));
        assert!(!eval(cond("Cookie Name", "Matches", "dark"), FORM_POST));

        // Value conditions look at cookie values, not names
        assert!(eval(cond("Cookie Value", "Matches", "dark"), FORM_POST));
        assert!(!eval(cond("Cookie Value", "Matches", "theme"), FORM_POST));
    }

    #[test]
    fn test_any_header_skips_request_line() {
        assert!(eval(cond("Any Header", "Matches", "Host: .*"), FORM_POST));
        assert!(!eval(cond("Any Header", "Matches", "POST .*"), FORM_POST));
    }

    #[test]
    fn test_request_body() {
        assert!(eval(cond("Request Body", "Matches", ".*admin=0"), FORM_POST));
        assert!(eval(cond("Request Body", "Does Not Match", "admin=1"), FORM_POST));
    }

    #[test]
    fn test_param_name_and_value_span_all_kinds() {
        assert!(eval(cond("Param Name", "Matches", "id"), FORM_POST));
        assert!(eval(cond("Param Name", "Matches", "email"), FORM_POST));
        assert!(eval(cond("Param Name", "Matches", "theme"), FORM_POST));
        assert!(eval(cond("Param Value", "Matches", "abc\\d+"), FORM_POST));
        assert!(!eval(cond("Param Value", "Matches", "nothing"), FORM_POST));
    }

    #[test]
    fn test_sent_from_tool() {
        let service = HttpService::default();
        let check = |relationship: &str, tool: ToolType| {
            eval_with(&[cond("Sent From Tool", relationship, "")], PLAIN_GET, &service, tool).unwrap()
        };

        assert!(check("Burp", ToolType::Repeater));
        assert!(!check("Burp", ToolType::Scanner));
        assert!(!check("Burp", ToolType::Extender));
        assert!(check("Proxy", ToolType::Proxy));
        assert!(!check("Proxy", ToolType::Repeater));
        assert!(check("Scanner", ToolType::Scanner));
        assert!(check("Intruder", ToolType::Intruder));
    }

    #[test]
    fn test_listener_port() {
        assert!(eval(cond("Listener Port", "Matches", "443"), PLAIN_GET));
        assert!(!eval(cond("Listener Port", "Matches", "8080"), PLAIN_GET));
        assert!(eval(cond("Listener Port", "Does Not Match", "8080"), PLAIN_GET));

        let err = cond("Listener Port", "Matches", "http").compile().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_unknown_relationship_is_configuration_error() {
        let err = cond("Protocol", "Matches", "").compile().unwrap_err();
        assert!(matches!(err, RuleError::Configuration { .. }));

        let err = cond("Sent From Tool", "Decoder", "").compile().unwrap_err();
        assert!(matches!(err, RuleError::Configuration { .. }));
    }

    #[test]
    fn test_invalid_regex_is_pattern_error() {
        let err = cond("HTTP Method", "Matches", "(GET").compile().unwrap_err();
        assert!(matches!(err, RuleError::Pattern { .. }));
    }

    #[test]
    fn test_unknown_match_type_normalizes_to_domain_name() {
        let condition = cond("IP Address", "Matches", "shop.example.com");
        assert_eq!(condition.match_type, MatchType::DomainName);
        assert!(eval(condition, PLAIN_GET));
    }

    #[test]
    fn test_boolean_operator_normalization() {
        assert_eq!(BooleanOperator::normalize("Or"), BooleanOperator::Or);
        assert_eq!(BooleanOperator::normalize("AND"), BooleanOperator::And);
        assert_eq!(BooleanOperator::normalize(""), BooleanOperator::None);
        assert_eq!(BooleanOperator::normalize("Xor"), BooleanOperator::And);
    }

    #[test]
    fn test_fold_is_left_associative() {
        let t = cond("Protocol", "Is Not HTTP", "");
        let f = cond("Protocol", "Is HTTP", "");
        let with_op = |c: &Condition, op: &str| {
            let mut c = c.clone();
            c.set_boolean_operator(op);
            c
        };

        // F AND F OR T == (F AND F) OR T == true; right-associated would be false
        let list = vec![f.clone(), with_op(&f, "And"), with_op(&t, "Or")];
        let service = HttpService::new("a", 443, "https");
        assert!(eval_with(&list, PLAIN_GET, &service, ToolType::Proxy).unwrap());

        // T OR T AND F == (T OR T) AND F == false; right-associated would be true
        let list = vec![t.clone(), with_op(&t, "Or"), with_op(&f, "And")];
        assert!(!eval_with(&list, PLAIN_GET, &service, ToolType::Proxy).unwrap());
    }

    #[test]
    fn test_disabled_conditions_are_skipped() {
        let service = HttpService::new("a", 443, "https");
        let t = cond("Protocol", "Is Not HTTP", "");
        let mut f = cond("Protocol", "Is HTTP", "");
        f.set_boolean_operator("And");

        let list = vec![t.clone(), f.clone().disabled()];
        assert!(eval_with(&list, PLAIN_GET, &service, ToolType::Proxy).unwrap());

        // A disabled condition with a broken config is never compiled
        let broken = cond("HTTP Method", "Matches", "(").disabled();
        let list = vec![t, broken];
        assert!(eval_with(&list, PLAIN_GET, &service, ToolType::Proxy).unwrap());

        // No enabled condition at all
        assert!(eval_with(&[f.disabled()], PLAIN_GET, &service, ToolType::Proxy).unwrap());
    }

    #[test]
    fn test_relationship_vocabulary() {
        assert_eq!(
            MatchType::Url.relationship_options(),
            &["Matches", "Does Not Match", "Is In Scope"]
        );
        assert_eq!(MatchType::SentFromTool.relationship_options().len(), 6);
        assert!(!MatchType::Protocol.is_editable());
        assert!(!MatchType::Request.is_editable());
        assert!(!MatchType::SentFromTool.is_editable());
        assert!(MatchType::ListenerPort.is_editable());
    }

    #[test]
    fn test_condition_serde_field_names() {
        let json = r#"{
            "booleanOperator": "Or",
            "matchType": "HTTP Method",
            "matchRelationship": "Matches",
            "matchCondition": "GET",
            "isEnabled": false
        }"#;
        let condition: Condition = serde_json::from_str(json).unwrap();
        assert_eq!(condition.boolean_operator, BooleanOperator::Or);
        assert_eq!(condition.match_type, MatchType::HttpMethod);
        assert!(!condition.enabled);

        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["matchType"], "HTTP Method");
        assert_eq!(value["booleanOperator"], "Or");
    }
}
