//! Parse results.

use std::borrow::Cow;

use serde::Serialize;

use crate::engine::context::{LastMatch, ParsingContext};
use crate::matches::Match;

/// Outcome of one parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ParseStatus {
    /// The axiom matched and consumed the whole input.
    Success,
    /// The axiom matched but unconsumed input remains.
    Partial,
    /// The axiom failed.
    Failure,
}

impl ParseStatus {
    /// One-character code used in diagnostics: `S`, `p`, `F`.
    pub fn as_char(self) -> char {
        match self {
            ParseStatus::Success => 'S',
            ParseStatus::Partial => 'p',
            ParseStatus::Failure => 'F',
        }
    }
}

/// The outcome of a parse: status, the match tree (owned), and the context
/// the parse ran in.
pub struct ParsingResult<'i> {
    status: ParseStatus,
    matched: Option<Box<Match>>,
    context: ParsingContext<'i>,
}

impl<'i> ParsingResult<'i> {
    pub(crate) fn new(matched: Option<Box<Match>>, context: ParsingContext<'i>) -> ParsingResult<'i> {
        let status = match &matched {
            Some(_) if context.cursor.remaining() > 0 => ParseStatus::Partial,
            Some(_) => ParseStatus::Success,
            None => ParseStatus::Failure,
        };
        ParsingResult {
            status,
            matched,
            context,
        }
    }

    pub fn status(&self) -> ParseStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }

    pub fn is_partial(&self) -> bool {
        self.status == ParseStatus::Partial
    }

    pub fn is_failure(&self) -> bool {
        self.status == ParseStatus::Failure
    }

    /// The root match, if the axiom matched.
    pub fn matched(&self) -> Option<&Match> {
        self.matched.as_deref()
    }

    /// Take ownership of the match tree.
    pub fn into_match(self) -> Option<Box<Match>> {
        self.matched
    }

    pub fn context(&self) -> &ParsingContext<'i> {
        &self.context
    }

    /// Bytes consumed by the parse.
    pub fn parsed(&self) -> usize {
        self.context.cursor.offset()
    }

    /// Unconsumed bytes left in the loaded window.
    pub fn remaining(&self) -> usize {
        self.context.cursor.remaining()
    }

    /// The furthest successful match, for failure reporting.
    pub fn last_match(&self) -> Option<LastMatch> {
        self.context.last_match()
    }

    /// Input bytes covered by a match from this parse.
    pub fn slice(&self, matched: &Match) -> &[u8] {
        &self.context.cursor.bytes()[matched.offset()..matched.end_offset()]
    }

    /// Input text covered by a match from this parse.
    pub fn text_of(&self, matched: &Match) -> Cow<'_, str> {
        String::from_utf8_lossy(self.slice(matched))
    }
}
