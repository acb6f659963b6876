//! Analyzed view of a raw HTTP request

use crate::error::ParseError;
use crate::latin1;
use crate::parameter::{Parameter, ParameterKind};
use crate::service::HttpService;
use crate::ParseResult;
use url::Url;

/// Decomposed HTTP request
///
/// `headers` never contains the request line; `head_lines()` gives the
/// request line followed by the headers, which is the shape
/// `MessageParser::build_message` expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpMessage {
    /// First line of the request (`GET /path HTTP/1.1`)
    pub request_line: String,
    /// Header lines in message order
    pub headers: Vec<String>,
    /// Index of the first body byte in the raw request
    pub body_offset: usize,
    /// Body bytes
    pub body: Vec<u8>,
    /// URL, body and cookie parameters in message order
    pub parameters: Vec<Parameter>,
}

/// Split a header line into name and value
///
/// The name is everything before the first `:`; leading whitespace is
/// trimmed from the value. Lines without a `:` have no name.
pub fn split_header(line: &str) -> Option<(&str, &str)> {
    line.split_once(':')
        .map(|(name, value)| (name, value.trim_start()))
}

impl HttpMessage {
    /// Request method
    pub fn method(&self) -> &str {
        self.request_line.split(' ').next().unwrap_or("")
    }

    /// Request target as written in the request line
    pub fn target(&self) -> &str {
        self.request_line.split(' ').nth(1).unwrap_or("")
    }

    /// Path of the request target, without query or fragment
    pub fn path(&self) -> &str {
        let target = self.target();
        let target = match target.split_once("://") {
            Some((_, rest)) => rest.find('/').map_or("/", |idx| &rest[idx..]),
            None => target,
        };
        let end = target.find(['?', '#']).unwrap_or(target.len());
        &target[..end]
    }

    /// Query string of the request target, without fragment
    pub fn query(&self) -> Option<&str> {
        let (_, query) = self.target().split_once('?')?;
        Some(query.split('#').next().unwrap_or(query))
    }

    /// First value of the named header (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            split_header(line)
                .filter(|(header_name, _)| header_name.trim().eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    /// Value of the `Content-Type` header
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Whether the body is `multipart/form-data`
    pub fn is_multipart_form(&self) -> bool {
        self.content_type()
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("multipart/form-data"))
    }

    /// Whether the body is `application/x-www-form-urlencoded`
    pub fn is_url_encoded_form(&self) -> bool {
        self.content_type().is_some_and(|ct| {
            ct.to_ascii_lowercase()
                .contains("application/x-www-form-urlencoded")
        })
    }

    /// Request line followed by every header line
    pub fn head_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.headers.len() + 1);
        lines.push(self.request_line.clone());
        lines.extend(self.headers.iter().cloned());
        lines
    }

    /// Body decoded as ISO-8859-1 text
    pub fn body_text(&self) -> String {
        latin1::decode(&self.body)
    }

    /// Parameters of one kind, in message order
    pub fn parameters_of(&self, kind: ParameterKind) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter().filter(move |p| p.kind == kind)
    }

    /// Absolute URL of the request
    ///
    /// Absolute-form targets are used as-is; origin-form targets are joined to
    /// the service's protocol, host and port.
    pub fn url(&self, service: &HttpService) -> ParseResult<Url> {
        let target = self.target();
        let raw = if target.contains("://") {
            target.to_string()
        } else if target.starts_with('/') {
            format!("{}://{}:{}{}", service.protocol, service.host, service.port, target)
        } else {
            format!("{}://{}:{}/", service.protocol, service.host, service.port)
        };

        Url::parse(&raw).map_err(|e| ParseError::url(&raw, e))
    }
}
