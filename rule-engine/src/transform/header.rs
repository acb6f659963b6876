//! Header mutation: replace, add and remove header lines
//!
//! The request line is never an occurrence; only the lines after it are.

use super::select;
use crate::error::RuleResult;
use crate::matcher::Matcher;
use crate::replacement::ReplacementCount;
use message_view::{split_header, HttpMessage, MessageParser};
use tracing::trace;

/// What happens to a matching header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderOp {
    /// Whole line matches, whole line is replaced
    ReplaceLine,
    /// Name matches, value is replaced
    ReplaceValueByName,
    /// Name matches, line is removed
    RemoveByName,
    /// Value matches, line is removed
    RemoveByValue,
}

impl HeaderOp {
    fn is_candidate(&self, matcher: &Matcher, line: &str) -> bool {
        match self {
            HeaderOp::ReplaceLine => matcher.is_match(line),
            HeaderOp::ReplaceValueByName | HeaderOp::RemoveByName => {
                split_header(line).is_some_and(|(name, _)| matcher.is_match(name))
            }
            HeaderOp::RemoveByValue => {
                split_header(line).is_some_and(|(_, value)| matcher.is_match(value))
            }
        }
    }

    fn mutate(&self, line: &str, replace: &str) -> Option<String> {
        match self {
            HeaderOp::ReplaceLine => Some(replace.to_string()),
            HeaderOp::ReplaceValueByName => {
                split_header(line).map(|(name, _)| format!("{}: {}", name, replace))
            }
            HeaderOp::RemoveByName | HeaderOp::RemoveByValue => None,
        }
    }
}

/// Header line transformer
pub struct HeaderTransform<'a> {
    op: HeaderOp,
    matcher: &'a Matcher,
    replace: &'a str,
}

impl<'a> HeaderTransform<'a> {
    pub fn new(op: HeaderOp, matcher: &'a Matcher, replace: &'a str) -> Self {
        Self {
            op,
            matcher,
            replace,
        }
    }

    pub fn apply(
        &self,
        request: &[u8],
        which: ReplacementCount,
        parser: &dyn MessageParser,
    ) -> RuleResult<Vec<Vec<u8>>> {
        let message = parser.parse(request)?;
        let positions: Vec<usize> = message
            .headers
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| self.op.is_candidate(self.matcher, line).then_some(idx))
            .collect();

        trace!(op = ?self.op, occurrences = positions.len(), "Matched header lines");

        let variants = select(&message.headers, &positions, which, |line: &String| {
            self.op.mutate(line, self.replace)
        });

        Ok(variants
            .iter()
            .map(|headers| rebuild(parser, &message, headers))
            .collect())
    }
}

/// Append `header` as the last header line
///
/// A trailing `Content-Length` line is dropped first so the new header does
/// not land after it; rebuilding restores `Content-Length` from the body.
pub fn add_header(
    request: &[u8],
    header: &str,
    parser: &dyn MessageParser,
) -> RuleResult<Vec<u8>> {
    let message = parser.parse(request)?;
    let mut headers = message.headers.clone();

    let trailing_length = headers.last().and_then(|line| split_header(line)).is_some_and(
        |(name, _)| name.trim().eq_ignore_ascii_case("content-length"),
    );
    if trailing_length {
        headers.pop();
    }
    headers.push(header.to_string());

    Ok(rebuild(parser, &message, &headers))
}

fn rebuild(parser: &dyn MessageParser, message: &HttpMessage, headers: &[String]) -> Vec<u8> {
    let mut lines = Vec::with_capacity(headers.len() + 1);
    lines.push(message.request_line.clone());
    // An empty line would end the head early
    lines.extend(headers.iter().filter(|line| !line.is_empty()).cloned());
    parser.build_message(&lines, &message.body)
}
