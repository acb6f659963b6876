//! Body mutation
//!
//! The body is a single occurrence: either the whole body matches and is
//! replaced, or nothing changes. Cardinality modes make no difference.

use crate::error::RuleResult;
use crate::matcher::Matcher;
use message_view::MessageParser;

pub struct BodyTransform<'a> {
    matcher: &'a Matcher,
    replace: &'a str,
}

impl<'a> BodyTransform<'a> {
    pub fn new(matcher: &'a Matcher, replace: &'a str) -> Self {
        Self { matcher, replace }
    }

    /// Replace the whole body when it matches, returning `None` otherwise
    pub fn apply(&self, request: &[u8], parser: &dyn MessageParser) -> RuleResult<Option<Vec<u8>>> {
        let message = parser.parse(request)?;
        if !self.matcher.is_match(&message.body_text()) {
            return Ok(None);
        }

        Ok(Some(parser.build_message(
            &message.head_lines(),
            self.replace.as_bytes(),
        )))
    }
}
