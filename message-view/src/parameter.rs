//! Typed request parameters
//!
//! Names and values are kept exactly as they appear in the message (no
//! percent-decoding), so a parameter removed and added back round-trips
//! without changing its encoding.

use serde::{Deserialize, Serialize};

/// Where a parameter lives in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Query string of the request target
    Url,
    /// `application/x-www-form-urlencoded` body
    Body,
    /// `Cookie` header
    Cookie,
}

/// One parameter of a request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub kind: ParameterKind,
    pub name: String,
    pub value: String,
}

impl Parameter {
    pub fn new(kind: ParameterKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Copy of this parameter with another name
    pub fn with_name(&self, name: &str) -> Self {
        Self::new(self.kind, name, self.value.clone())
    }

    /// Copy of this parameter with another value
    pub fn with_value(&self, value: &str) -> Self {
        Self::new(self.kind, self.name.clone(), value)
    }

    /// `name=value` form used in query strings, bodies and cookies
    pub fn encode(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Split `a=1&b=2` style text into parameters of the given kind
pub(crate) fn parse_pairs(text: &str, separator: char, kind: ParameterKind) -> Vec<Parameter> {
    text.split(separator)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((name, value)) => Parameter::new(kind, name, value),
            None => Parameter::new(kind, segment, ""),
        })
        .collect()
}

/// Join parameters back with the given separator
pub(crate) fn join_pairs<'a>(
    parameters: impl IntoIterator<Item = &'a Parameter>,
    separator: &str,
) -> String {
    parameters
        .into_iter()
        .map(Parameter::encode)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_pairs() {
        let params = parse_pairs("a=1&b=&flag&&c=x=y", '&', ParameterKind::Url);

        assert_eq!(params.len(), 4);
        assert_eq!(params[0], Parameter::new(ParameterKind::Url, "a", "1"));
        assert_eq!(params[1], Parameter::new(ParameterKind::Url, "b", ""));
        assert_eq!(params[2], Parameter::new(ParameterKind::Url, "flag", ""));
        assert_eq!(params[3], Parameter::new(ParameterKind::Url, "c", "x=y"));
    }

    #[test]
    fn test_parse_cookie_pairs() {
        let params = parse_pairs("session=abc; theme=dark", ';', ParameterKind::Cookie);

        assert_eq!(params.len(), 2);
        assert_eq!(params[1].name, "theme");
        assert_eq!(params[1].value, "dark");
    }

    #[test]
    fn test_join_pairs() {
        let params = vec![
            Parameter::new(ParameterKind::Body, "a", "1"),
            Parameter::new(ParameterKind::Body, "b", "2"),
        ];
        assert_eq!(join_pairs(&params, "&"), "a=1&b=2");
        assert_eq!(params[0].with_value("9").encode(), "a=9");
        assert_eq!(params[1].with_name("z").encode(), "z=2");
    }
}
