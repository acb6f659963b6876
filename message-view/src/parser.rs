//! HTTP message parser collaborator
//!
//! Both engines only see requests through `MessageParser`, so a host
//! application can plug its own parser in. `RawMessageParser` is a
//! line-oriented implementation that tolerates the malformed input an
//! interception proxy routinely sees.

use crate::error::ParseError;
use crate::latin1;
use crate::message::{split_header, HttpMessage};
use crate::parameter::{join_pairs, parse_pairs, Parameter, ParameterKind};
use crate::ParseResult;
use tracing::trace;

/// Decomposes raw requests and recomposes them
pub trait MessageParser: Send + Sync {
    /// Analyze a raw request
    fn parse(&self, raw: &[u8]) -> ParseResult<HttpMessage>;

    /// Build a raw request from head lines (request line first) and a body
    ///
    /// `Content-Length` is updated or added to match the body.
    fn build_message(&self, head_lines: &[String], body: &[u8]) -> Vec<u8>;

    /// Add a parameter to a raw request
    fn add_parameter(&self, raw: &[u8], parameter: &Parameter) -> ParseResult<Vec<u8>>;

    /// Remove the first parameter equal to `parameter` from a raw request
    fn remove_parameter(&self, raw: &[u8], parameter: &Parameter) -> ParseResult<Vec<u8>>;
}

/// Default parser working directly on request bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct RawMessageParser;

impl RawMessageParser {
    pub fn new() -> Self {
        Self
    }
}

impl MessageParser for RawMessageParser {
    fn parse(&self, raw: &[u8]) -> ParseResult<HttpMessage> {
        if raw.is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let (head_end, body_offset) = find_head_end(raw);
        let head = latin1::decode(&raw[..head_end]);
        let mut lines = head.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

        let request_line = lines.next().unwrap_or_default().to_string();
        if request_line.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }
        let mut parts = request_line.split(' ').filter(|p| !p.is_empty());
        if parts.next().is_none() || parts.next().is_none() {
            return Err(ParseError::request_line(&request_line));
        }

        let headers = lines
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        let mut message = HttpMessage {
            request_line,
            headers,
            body_offset,
            body: raw[body_offset..].to_vec(),
            parameters: Vec::new(),
        };
        message.parameters = collect_parameters(&message);

        trace!(
            method = message.method(),
            headers = message.headers.len(),
            parameters = message.parameters.len(),
            body_offset,
            "Parsed request"
        );

        Ok(message)
    }

    fn build_message(&self, head_lines: &[String], body: &[u8]) -> Vec<u8> {
        let mut lines = head_lines.to_vec();
        let mut has_length = false;

        for line in lines.iter_mut().skip(1) {
            if is_content_length(line) {
                *line = format!("Content-Length: {}", body.len());
                has_length = true;
            }
        }
        if !has_length && !body.is_empty() {
            lines.push(format!("Content-Length: {}", body.len()));
        }

        let mut out = latin1::encode(&lines.join("\r\n"));
        out.reserve(4 + body.len());
        out.extend_from_slice(b"\r\n\r\n");
        out.extend_from_slice(body);
        out
    }

    fn add_parameter(&self, raw: &[u8], parameter: &Parameter) -> ParseResult<Vec<u8>> {
        let message = self.parse(raw)?;
        let mut head = message.head_lines();
        let mut body = message.body.clone();

        match parameter.kind {
            ParameterKind::Url => {
                let mut params: Vec<Parameter> =
                    message.parameters_of(ParameterKind::Url).cloned().collect();
                params.push(parameter.clone());
                head[0] = rewrite_query(&message.request_line, &params);
            }
            ParameterKind::Body => {
                if !body.is_empty() {
                    body.push(b'&');
                }
                body.extend_from_slice(&latin1::encode(&parameter.encode()));
            }
            ParameterKind::Cookie => {
                let last_cookie = head
                    .iter()
                    .skip(1)
                    .rposition(|line| is_cookie_header(line))
                    .map(|idx| idx + 1);
                match last_cookie {
                    Some(idx) => {
                        let line = &head[idx];
                        let has_value = split_header(line).is_some_and(|(_, v)| !v.trim().is_empty());
                        let updated = if has_value {
                            format!("{}; {}", line.trim_end().trim_end_matches(';'), parameter.encode())
                        } else {
                            format!("Cookie: {}", parameter.encode())
                        };
                        head[idx] = updated;
                    }
                    None => head.push(format!("Cookie: {}", parameter.encode())),
                }
            }
        }

        Ok(self.build_message(&head, &body))
    }

    fn remove_parameter(&self, raw: &[u8], parameter: &Parameter) -> ParseResult<Vec<u8>> {
        let message = self.parse(raw)?;
        let mut head = message.head_lines();
        let mut body = message.body.clone();

        match parameter.kind {
            ParameterKind::Url => {
                let mut params: Vec<Parameter> =
                    message.parameters_of(ParameterKind::Url).cloned().collect();
                let Some(idx) = params.iter().position(|p| p == parameter) else {
                    return Ok(raw.to_vec());
                };
                params.remove(idx);
                head[0] = rewrite_query(&message.request_line, &params);
            }
            ParameterKind::Body => {
                let mut params: Vec<Parameter> =
                    message.parameters_of(ParameterKind::Body).cloned().collect();
                let Some(idx) = params.iter().position(|p| p == parameter) else {
                    return Ok(raw.to_vec());
                };
                params.remove(idx);
                body = latin1::encode(&join_pairs(&params, "&"));
            }
            ParameterKind::Cookie => {
                let found = head.iter().enumerate().skip(1).find_map(|(idx, line)| {
                    let (name, value) = split_header(line)?;
                    if !name.trim().eq_ignore_ascii_case("cookie") {
                        return None;
                    }
                    let cookies = parse_pairs(value, ';', ParameterKind::Cookie);
                    let pos = cookies.iter().position(|c| c == parameter)?;
                    Some((idx, name.to_string(), cookies, pos))
                });
                let Some((idx, name, mut cookies, pos)) = found else {
                    return Ok(raw.to_vec());
                };
                cookies.remove(pos);
                if cookies.is_empty() {
                    head.remove(idx);
                } else {
                    head[idx] = format!("{}: {}", name, join_pairs(&cookies, "; "));
                }
            }
        }

        Ok(self.build_message(&head, &body))
    }
}

/// Locate the end of the head and the start of the body
///
/// The earliest blank line ends the head, whether its separator is CRLF or a
/// bare LF.
fn find_head_end(raw: &[u8]) -> (usize, usize) {
    let crlf = find_subslice(raw, b"\r\n\r\n").map(|idx| (idx, idx + 4));
    let lf = find_subslice(raw, b"\n\n").map(|idx| (idx, idx + 2));

    match (crlf, lf) {
        (Some(crlf), Some(lf)) => crlf.min(lf),
        (Some(found), None) | (None, Some(found)) => found,
        (None, None) => (raw.len(), raw.len()),
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn is_content_length(line: &str) -> bool {
    split_header(line).is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
}

fn is_cookie_header(line: &str) -> bool {
    split_header(line).is_some_and(|(name, _)| name.trim().eq_ignore_ascii_case("cookie"))
}

fn collect_parameters(message: &HttpMessage) -> Vec<Parameter> {
    let mut parameters = Vec::new();

    if let Some(query) = message.query() {
        parameters.extend(parse_pairs(query, '&', ParameterKind::Url));
    }
    if message.is_url_encoded_form() {
        parameters.extend(parse_pairs(&message.body_text(), '&', ParameterKind::Body));
    }
    for line in &message.headers {
        if let Some((name, value)) = split_header(line) {
            if name.trim().eq_ignore_ascii_case("cookie") {
                parameters.extend(parse_pairs(value, ';', ParameterKind::Cookie));
            }
        }
    }

    parameters
}

/// Request line with its query replaced by `params`
fn rewrite_query(request_line: &str, params: &[Parameter]) -> String {
    let mut parts = request_line.splitn(3, ' ');
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    let version = parts.next();

    let (without_fragment, fragment) = match target.split_once('#') {
        Some((t, f)) => (t, Some(f)),
        None => (target, None),
    };
    let mut new_target = without_fragment
        .split('?')
        .next()
        .unwrap_or(without_fragment)
        .to_string();
    if !params.is_empty() {
        new_target.push('?');
        new_target.push_str(&join_pairs(params, "&"));
    }
    if let Some(fragment) = fragment {
        new_target.push('#');
        new_target.push_str(fragment);
    }

    match version {
        Some(version) => format!("{} {} {}", method, new_target, version),
        None => format!("{} {}", method, new_target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FORM_POST: &str = "POST /login?next=home&lang=en HTTP/1.1\r\n\
        Host: example.com\r\n\
        Cookie: session=abc; theme=dark\r\n\
        Content-Type: application/x-www-form-urlencoded\r\n\
        Content-Length: 19\r\n\
        \r\n\
        user=bob&pass=s3cr3";

    fn text(raw: &[u8]) -> String {
        String::from_utf8(raw.to_vec()).unwrap()
    }

    #[test]
    fn test_parse_form_post() {
        let parser = RawMessageParser::new();
        let msg = parser.parse(FORM_POST.as_bytes()).unwrap();

        assert_eq!(msg.request_line, "POST /login?next=home&lang=en HTTP/1.1");
        assert_eq!(msg.headers.len(), 4);
        assert_eq!(msg.body, b"user=bob&pass=s3cr3");
        assert_eq!(msg.body_offset, FORM_POST.len() - 19);

        let kinds: Vec<ParameterKind> = msg.parameters.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParameterKind::Url,
                ParameterKind::Url,
                ParameterKind::Body,
                ParameterKind::Body,
                ParameterKind::Cookie,
                ParameterKind::Cookie,
            ]
        );
        assert_eq!(msg.parameters[2].name, "user");
        assert_eq!(msg.parameters[5].value, "dark");
    }

    #[test]
    fn test_parse_bare_lf_and_no_body() {
        let parser = RawMessageParser::new();
        let msg = parser.parse(b"GET / HTTP/1.1\nHost: a\n\n").unwrap();
        assert_eq!(msg.headers, vec!["Host: a".to_string()]);
        assert!(msg.body.is_empty());

        let msg = parser.parse(b"GET / HTTP/1.1\r\nHost: a").unwrap();
        assert_eq!(msg.headers.len(), 1);
        assert_eq!(msg.body_offset, 23);
    }

    #[test]
    fn test_parse_ignores_body_params_without_form_content_type() {
        let parser = RawMessageParser::new();
        let raw = b"POST / HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"a\":1}";
        let msg = parser.parse(raw).unwrap();
        assert!(msg.parameters.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        let parser = RawMessageParser::new();
        assert_eq!(parser.parse(b""), Err(ParseError::EmptyRequest));
        assert_eq!(parser.parse(b"\r\n\r\nbody"), Err(ParseError::EmptyRequest));
        assert!(matches!(
            parser.parse(b"GARBAGE\r\n\r\n"),
            Err(ParseError::InvalidRequestLine { .. })
        ));
    }

    #[test]
    fn test_build_message_updates_content_length() {
        let parser = RawMessageParser::new();
        let head = vec![
            "POST / HTTP/1.1".to_string(),
            "Content-Length: 999".to_string(),
            "Host: a".to_string(),
        ];

        let raw = parser.build_message(&head, b"abc");
        assert_eq!(text(&raw), "POST / HTTP/1.1\r\nContent-Length: 3\r\nHost: a\r\n\r\nabc");
    }

    #[test]
    fn test_build_message_appends_content_length() {
        let parser = RawMessageParser::new();
        let head = vec!["POST / HTTP/1.1".to_string(), "Host: a".to_string()];

        let raw = parser.build_message(&head, b"abc");
        assert_eq!(text(&raw), "POST / HTTP/1.1\r\nHost: a\r\nContent-Length: 3\r\n\r\nabc");

        let raw = parser.build_message(&head, b"");
        assert_eq!(text(&raw), "POST / HTTP/1.1\r\nHost: a\r\n\r\n");
    }

    #[test]
    fn test_remove_and_add_url_parameter() {
        let parser = RawMessageParser::new();
        let next = Parameter::new(ParameterKind::Url, "next", "home");
        let lang = Parameter::new(ParameterKind::Url, "lang", "en");

        let raw = parser.remove_parameter(FORM_POST.as_bytes(), &next).unwrap();
        let raw = parser.remove_parameter(&raw, &lang).unwrap();
        let msg = parser.parse(&raw).unwrap();
        assert_eq!(msg.request_line, "POST /login HTTP/1.1");

        let raw = parser.add_parameter(&raw, &lang).unwrap();
        let msg = parser.parse(&raw).unwrap();
        assert_eq!(msg.request_line, "POST /login?lang=en HTTP/1.1");
    }

    #[test]
    fn test_remove_body_parameter_updates_length() {
        let parser = RawMessageParser::new();
        let user = Parameter::new(ParameterKind::Body, "user", "bob");

        let raw = parser.remove_parameter(FORM_POST.as_bytes(), &user).unwrap();
        let msg = parser.parse(&raw).unwrap();
        assert_eq!(msg.body, b"pass=s3cr3");
        assert_eq!(msg.header("Content-Length"), Some("10"));

        let raw = parser.add_parameter(&raw, &user).unwrap();
        let msg = parser.parse(&raw).unwrap();
        assert_eq!(msg.body, b"pass=s3cr3&user=bob");
    }

    #[test]
    fn test_cookie_parameter_edits() {
        let parser = RawMessageParser::new();
        let session = Parameter::new(ParameterKind::Cookie, "session", "abc");
        let theme = Parameter::new(ParameterKind::Cookie, "theme", "dark");

        let raw = parser.remove_parameter(FORM_POST.as_bytes(), &session).unwrap();
        let msg = parser.parse(&raw).unwrap();
        assert_eq!(msg.header("Cookie"), Some("theme=dark"));

        let raw = parser.remove_parameter(&raw, &theme).unwrap();
        let msg = parser.parse(&raw).unwrap();
        assert_eq!(msg.header("Cookie"), None);

        let raw = parser.add_parameter(&raw, &session).unwrap();
        let raw = parser.add_parameter(&raw, &theme).unwrap();
        let msg = parser.parse(&raw).unwrap();
        assert_eq!(msg.header("Cookie"), Some("session=abc; theme=dark"));
    }

    #[test]
    fn test_remove_missing_parameter_is_identity() {
        let parser = RawMessageParser::new();
        let missing = Parameter::new(ParameterKind::Url, "nope", "x");

        let raw = parser.remove_parameter(FORM_POST.as_bytes(), &missing).unwrap();
        assert_eq!(raw, FORM_POST.as_bytes());
    }

    #[test]
    fn test_rewrite_query_keeps_fragment() {
        let params = vec![Parameter::new(ParameterKind::Url, "a", "1")];
        assert_eq!(rewrite_query("GET /x?old=1#frag HTTP/1.1", &params), "GET /x?a=1#frag HTTP/1.1");
        assert_eq!(rewrite_query("GET /x?old=1 HTTP/1.1", &[]), "GET /x HTTP/1.1");
    }

    #[test]
    fn test_earliest_blank_line_ends_head() {
        let parser = RawMessageParser::new();
        let msg = parser.parse(b"POST / HTTP/1.1\nHost: a\n\nline1\r\n\r\nline2").unwrap();
        assert_eq!(msg.headers, vec!["Host: a".to_string()]);
        assert_eq!(msg.body, b"line1\r\n\r\nline2");

        let msg = parser.parse(b"POST / HTTP/1.1\r\nHost: a\r\n\r\nx\n\ny").unwrap();
        assert_eq!(msg.headers, vec!["Host: a".to_string()]);
        assert_eq!(msg.body, b"x\n\ny");
    }

    #[test]
    fn test_rebuild_keeps_non_utf8_bytes() {
        let parser = RawMessageParser::new();
        let raw = b"POST / HTTP/1.1\r\n\
            X-Name: caf\xe9\r\n\
            Content-Type: application/x-www-form-urlencoded\r\n\
            Content-Length: 16\r\n\
            \r\n\
            name=caf\xe9&role=a";

        let msg = parser.parse(raw).unwrap();
        assert_eq!(msg.header("X-Name"), Some("caf\u{e9}"));
        assert_eq!(msg.parameters[0].value, "caf\u{e9}");
        assert_eq!(parser.build_message(&msg.head_lines(), &msg.body), raw.to_vec());

        let role = Parameter::new(ParameterKind::Body, "role", "a");
        let out = parser.remove_parameter(raw, &role).unwrap();
        assert!(out.ends_with(b"Content-Length: 9\r\n\r\nname=caf\xe9"));
    }

    proptest! {
        #[test]
        fn prop_build_message_length_matches_body(
            body in prop::collection::vec(any::<u8>(), 1..256),
            stale in 0usize..10_000
        ) {
            let parser = RawMessageParser::new();
            let head = vec![
                "POST /upload HTTP/1.1".to_string(),
                format!("Content-Length: {}", stale),
            ];

            let raw = parser.build_message(&head, &body);
            let msg = parser.parse(&raw).unwrap();
            let expected = body.len().to_string();
            prop_assert_eq!(msg.header("Content-Length"), Some(expected.as_str()));
        }
    }
}
