//! End-to-end scenarios for condition evaluation and request rewriting

use rule_engine::{
    evaluate_all, Condition, HttpService, RawMessageParser, Replacement, ReplacementType,
    RequestContext, Rule, RuleSet, ScopeMatcher, ToolType,
};

const GET: &[u8] = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";

fn evaluate(conditions: &[Condition], raw: &[u8], service: &HttpService, tool: ToolType) -> bool {
    let scope = ScopeMatcher::default();
    let ctx = RequestContext::new(raw, service, tool, &RawMessageParser, &scope).unwrap();
    evaluate_all(conditions, &ctx).unwrap()
}

fn text(raw: &[u8]) -> String {
    String::from_utf8(raw.to_vec()).unwrap()
}

fn head_lines(raw: &[u8]) -> Vec<String> {
    let text = text(raw);
    let head = text.split("\r\n\r\n").next().unwrap_or_default();
    head.split("\r\n").skip(1).map(str::to_string).collect()
}

#[test]
fn domain_name_matches_exact_host_only() {
    let condition = Condition::new("", "Domain Name", "Matches", "example.com");

    let exact = HttpService::new("example.com", 80, "http");
    assert!(evaluate(&[condition.clone()], GET, &exact, ToolType::Proxy));

    let sub = HttpService::new("sub.example.com", 80, "http");
    assert!(!evaluate(&[condition], GET, &sub, ToolType::Proxy));
}

#[test]
fn add_header_lands_before_recomputed_content_length() {
    let request = b"POST /submit HTTP/1.1\r\n\
        Host: example.com\r\n\
        Content-Type: text/plain\r\n\
        Content-Length: 10\r\n\
        \r\n\
        0123456789";
    let replacement = Replacement::new(
        ReplacementType::AddHeader,
        "",
        "X-Test: 1",
        "Replace First",
        "",
        false,
    );

    let out = replacement.apply(request, &RawMessageParser).unwrap();
    assert_eq!(out.len(), 1);

    let headers = head_lines(&out[0]);
    assert_eq!(
        headers,
        vec![
            "Host: example.com",
            "Content-Type: text/plain",
            "X-Test: 1",
            "Content-Length: 10",
        ]
    );
    assert!(out[0].ends_with(b"\r\n\r\n0123456789"));
}

#[test]
fn param_value_all_possibilities_enumerates_subsets() {
    let request = b"GET /q?a=old&b=old HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let replacement = Replacement::new(
        ReplacementType::RequestParamValue,
        "old",
        "new",
        "Replace all possibilities",
        "",
        false,
    );

    let out: Vec<String> = replacement
        .apply(request, &RawMessageParser)
        .unwrap()
        .iter()
        .map(|raw| text(raw))
        .collect();

    let first_lines: Vec<&str> = out.iter().map(|t| t.split("\r\n").next().unwrap()).collect();
    assert_eq!(
        first_lines,
        vec![
            "GET /q?a=new&b=old HTTP/1.1",
            "GET /q?a=old&b=new HTTP/1.1",
            "GET /q?a=new&b=new HTTP/1.1",
        ]
    );
}

#[test]
fn remove_header_by_name_removes_every_match() {
    let request = b"GET / HTTP/1.1\r\n\
        Host: example.com\r\n\
        X-Forwarded-For: 10.0.0.1\r\n\
        Accept: */*\r\n\
        X-Forwarded-For: 10.0.0.2\r\n\
        \r\n";
    let replacement = Replacement::new(
        ReplacementType::RemoveHeaderByName,
        "X-Forwarded-For",
        "",
        "Replace All",
        "",
        false,
    );

    let out = replacement.apply(request, &RawMessageParser).unwrap();
    assert_eq!(out.len(), 1);

    let headers = head_lines(&out[0]);
    assert_eq!(headers, vec!["Host: example.com", "Accept: */*"]);
    assert!(headers.iter().all(|h| !h.starts_with("X-Forwarded-For")));
}

#[test]
fn disabled_replacement_returns_input() {
    let replacement = Replacement::new(
        ReplacementType::RequestString,
        "example",
        "attacker",
        "Replace All",
        "",
        false,
    )
    .disabled();

    assert_eq!(replacement.apply(GET, &RawMessageParser).unwrap(), vec![GET.to_vec()]);
}

#[test]
fn rule_set_from_json_processes_request() {
    let json = r#"{
        "rules": [
            {
                "comment": "downgrade role on repeater traffic",
                "isEnabled": true,
                "conditions": [
                    {"booleanOperator": "", "matchType": "Sent From Tool", "matchRelationship": "Repeater", "matchCondition": "", "isEnabled": true},
                    {"booleanOperator": "And", "matchType": "Param Name", "matchRelationship": "Matches", "matchCondition": "role", "isEnabled": true}
                ],
                "replacements": [
                    {"type": "Request Param Value", "match": "admin", "replace": "user", "which": "Replace All", "comment": "", "isRegexMatch": false, "isEnabled": true},
                    {"type": "Remove Cookie By Name", "match": "debug", "replace": "", "which": "Replace First", "comment": "", "isRegexMatch": false, "isEnabled": true}
                ]
            }
        ]
    }"#;
    let rules = RuleSet::from_json(json).unwrap();

    let request = b"POST /profile HTTP/1.1\r\n\
        Host: example.com\r\n\
        Cookie: sid=1; debug=1\r\n\
        Content-Type: application/x-www-form-urlencoded\r\n\
        Content-Length: 17\r\n\
        \r\n\
        name=a&role=admin";
    let service = HttpService::new("example.com", 443, "https");
    let scope = ScopeMatcher::default();

    let ctx = RequestContext::new(request, &service, ToolType::Repeater, &RawMessageParser, &scope)
        .unwrap();
    let out = rules.process(&ctx, &RawMessageParser).unwrap();
    assert_eq!(out.len(), 1);

    let result = text(&out[0]);
    assert!(result.contains("Content-Length: 16\r\n"));
    assert!(result.ends_with("\r\n\r\nname=a&role=user"));
    assert!(result.contains("Cookie: sid=1\r\n"));
    assert!(!result.contains("debug"));

    let ctx = RequestContext::new(request, &service, ToolType::Proxy, &RawMessageParser, &scope)
        .unwrap();
    assert_eq!(rules.process(&ctx, &RawMessageParser).unwrap(), vec![request.to_vec()]);
}

#[test]
fn rule_builder_chains_replacements() {
    let rule = Rule::new("versioned api")
        .with_replacement(Replacement::new(
            ReplacementType::RequestFirstLine,
            "/v1/",
            "/v2/",
            "Replace First",
            "",
            true,
        ))
        .with_replacement(Replacement::new(
            ReplacementType::MatchHeaderNameReplaceValue,
            "Host",
            "api.example.com",
            "Replace First",
            "",
            false,
        ));

    let request = b"GET /v1/users HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let out = rule.apply(request, &RawMessageParser).unwrap();
    assert_eq!(
        out,
        vec![b"GET /v2/users HTTP/1.1\r\nHost: api.example.com\r\n\r\n".to_vec()]
    );
}
