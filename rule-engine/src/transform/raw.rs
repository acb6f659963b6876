//! Regex rewriting of the raw request and of its request line
//!
//! Both transforms search with the pattern rather than matching whole values.
//! Each regex match is one occurrence, and `$n` / `${name}` in the replacement
//! expand to the match's capture groups.

use super::select;
use crate::error::RuleResult;
use crate::matcher::compile_search_bytes;
use crate::replacement::ReplacementCount;
use message_view::{latin1, MessageParser};
use regex::bytes::Regex;
use tracing::trace;

/// Stretch of the haystack, with its expansion when it is a match
#[derive(Debug, Clone)]
struct Piece {
    text: Vec<u8>,
    replaced: Option<Vec<u8>>,
}

impl Piece {
    fn replace(&self) -> Option<Piece> {
        Some(Piece {
            text: self.replaced.clone().unwrap_or_else(|| self.text.clone()),
            replaced: None,
        })
    }
}

/// Cut `haystack` into alternating gaps and matches
///
/// Returns the pieces and the positions of the match pieces.
fn split_matches(regex: &Regex, haystack: &[u8], replace: &str) -> (Vec<Piece>, Vec<usize>) {
    let mut pieces = Vec::new();
    let mut positions = Vec::new();
    let mut last = 0;

    for caps in regex.captures_iter(haystack) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        pieces.push(Piece {
            text: haystack[last..whole.start()].to_vec(),
            replaced: None,
        });

        let mut replaced = Vec::new();
        caps.expand(replace.as_bytes(), &mut replaced);
        positions.push(pieces.len());
        pieces.push(Piece {
            text: whole.as_bytes().to_vec(),
            replaced: Some(replaced),
        });
        last = whole.end();
    }
    pieces.push(Piece {
        text: haystack[last..].to_vec(),
        replaced: None,
    });

    (pieces, positions)
}

fn rewrite(regex: &Regex, haystack: &[u8], replace: &str, which: ReplacementCount) -> Vec<Vec<u8>> {
    let (pieces, positions) = split_matches(regex, haystack, replace);
    trace!(occurrences = positions.len(), "Matched regex occurrences");

    select(&pieces, &positions, which, Piece::replace)
        .into_iter()
        .map(|pieces| pieces.into_iter().flat_map(|piece| piece.text).collect())
        .collect()
}

/// Byte-level rewrite of the whole request
///
/// Works on requests that do not survive structural parsing, such as binary
/// bodies. The result is not rebuilt, so `Content-Length` is left as written.
pub struct RequestStringTransform<'a> {
    regex: Regex,
    replace: &'a str,
}

impl<'a> RequestStringTransform<'a> {
    pub fn new(pattern: &str, replace: &'a str) -> RuleResult<Self> {
        Ok(Self {
            regex: compile_search_bytes(pattern)?,
            replace,
        })
    }

    pub fn apply(&self, request: &[u8], which: ReplacementCount) -> Vec<Vec<u8>> {
        rewrite(&self.regex, request, self.replace, which)
    }
}

/// Rewrite confined to the request line
pub struct FirstLineTransform<'a> {
    regex: Regex,
    replace: &'a str,
}

impl<'a> FirstLineTransform<'a> {
    pub fn new(pattern: &str, replace: &'a str) -> RuleResult<Self> {
        Ok(Self {
            regex: compile_search_bytes(pattern)?,
            replace,
        })
    }

    pub fn apply(
        &self,
        request: &[u8],
        which: ReplacementCount,
        parser: &dyn MessageParser,
    ) -> RuleResult<Vec<Vec<u8>>> {
        let message = parser.parse(request)?;
        let lines = rewrite(
            &self.regex,
            &latin1::encode(&message.request_line),
            self.replace,
            which,
        );

        Ok(lines
            .into_iter()
            .map(|line| {
                let mut head = message.head_lines();
                head[0] = latin1::decode(&line);
                parser.build_message(&head, &message.body)
            })
            .collect())
    }
}
