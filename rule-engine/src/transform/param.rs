//! Parameter and cookie mutation
//!
//! URL and body parameters form one occurrence list; cookies form another.
//! Each candidate is recomposed in two phases: every original parameter of the
//! family is removed from the raw request, then the finalized list is added
//! back and the message is rebuilt so `Content-Length` matches the new body.

use super::select;
use crate::error::{RuleError, RuleResult};
use crate::matcher::Matcher;
use crate::replacement::ReplacementCount;
use message_view::{MessageParser, Parameter, ParameterKind};
use tracing::trace;

/// Which parameters a transform operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFamily {
    /// URL and body parameters; multipart bodies are unsupported
    UrlAndBody,
    Cookie,
}

impl ParamFamily {
    fn includes(&self, kind: ParameterKind) -> bool {
        match self {
            ParamFamily::UrlAndBody => matches!(kind, ParameterKind::Url | ParameterKind::Body),
            ParamFamily::Cookie => kind == ParameterKind::Cookie,
        }
    }
}

/// What is matched and what happens to a matching parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamOp {
    ReplaceName,
    ReplaceValue,
    ReplaceValueByName,
    RemoveByName,
    RemoveByValue,
}

impl ParamOp {
    fn examined<'p>(&self, parameter: &'p Parameter) -> &'p str {
        match self {
            ParamOp::ReplaceName | ParamOp::ReplaceValueByName | ParamOp::RemoveByName => {
                &parameter.name
            }
            ParamOp::ReplaceValue | ParamOp::RemoveByValue => &parameter.value,
        }
    }

    fn mutate(&self, parameter: &Parameter, replace: &str) -> Option<Parameter> {
        match self {
            ParamOp::ReplaceName => Some(parameter.with_name(replace)),
            ParamOp::ReplaceValue | ParamOp::ReplaceValueByName => {
                Some(parameter.with_value(replace))
            }
            ParamOp::RemoveByName | ParamOp::RemoveByValue => None,
        }
    }
}

/// Parameter transformer
pub struct ParamTransform<'a> {
    family: ParamFamily,
    op: ParamOp,
    matcher: &'a Matcher,
    replace: &'a str,
}

impl<'a> ParamTransform<'a> {
    pub fn new(family: ParamFamily, op: ParamOp, matcher: &'a Matcher, replace: &'a str) -> Self {
        Self {
            family,
            op,
            matcher,
            replace,
        }
    }

    /// Candidate requests, or `UnsupportedInput` for a multipart body
    pub fn apply(
        &self,
        request: &[u8],
        which: ReplacementCount,
        parser: &dyn MessageParser,
    ) -> RuleResult<Vec<Vec<u8>>> {
        let message = parser.parse(request)?;
        if self.family == ParamFamily::UrlAndBody && message.is_multipart_form() {
            return Err(RuleError::unsupported(
                "multipart/form-data body in a parameter replacement",
            ));
        }

        let original: Vec<Parameter> = message
            .parameters
            .iter()
            .filter(|p| self.family.includes(p.kind))
            .cloned()
            .collect();
        let positions: Vec<usize> = original
            .iter()
            .enumerate()
            .filter_map(|(idx, p)| self.matcher.is_match(self.op.examined(p)).then_some(idx))
            .collect();

        trace!(
            family = ?self.family,
            op = ?self.op,
            parameters = original.len(),
            occurrences = positions.len(),
            "Matched parameters"
        );

        let variants = select(&original, &positions, which, |p: &Parameter| {
            self.op.mutate(p, self.replace)
        });

        variants
            .iter()
            .map(|finalized| recompose(parser, request, &original, finalized))
            .collect()
    }
}

/// Replace the `original` parameters of `request` with `finalized`
fn recompose(
    parser: &dyn MessageParser,
    request: &[u8],
    original: &[Parameter],
    finalized: &[Parameter],
) -> RuleResult<Vec<u8>> {
    let mut raw = request.to_vec();
    for parameter in original {
        raw = parser.remove_parameter(&raw, parameter)?;
    }
    for parameter in finalized {
        raw = parser.add_parameter(&raw, parameter)?;
    }

    let message = parser.parse(&raw)?;
    Ok(parser.build_message(&message.head_lines(), &message.body))
}
