//! Anchored regex matching for Token elements.
//!
//! Thin adapter over `regex_automata`'s meta engine: patterns compile once
//! at construction and are searched anchored at the cursor position over the
//! loaded window only. Haystacks are bytes, so no UTF-8 re-validation
//! happens on the hot path; compile failures are the only error leg.

use regex_automata::meta;
use regex_automata::{Anchored, Input};

use crate::error::GrammarError;

/// A compiled token pattern plus its source text for diagnostics.
#[derive(Debug)]
pub struct TokenPattern {
    pattern: String,
    regex: meta::Regex,
}

impl TokenPattern {
    /// Compile `pattern`. Invalid patterns are construction errors.
    pub fn compile(pattern: &str) -> Result<TokenPattern, GrammarError> {
        let regex = meta::Regex::new(pattern).map_err(|source| GrammarError::Pattern {
            pattern: pattern.to_string(),
            source: Box::new(source),
        })?;
        Ok(TokenPattern {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Source pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match anchored at the start of `window`, never scanning forward.
    ///
    /// Trailing groups that did not participate in the match are dropped, so
    /// the group count reflects what actually captured; interior unset
    /// groups come back as empty strings. Group 0 is the whole match.
    pub fn match_at(&self, window: &[u8]) -> Option<TokenCaptures> {
        let input = Input::new(window).anchored(Anchored::Yes);
        let mut captures = self.regex.create_captures();
        self.regex.search_captures(&input, &mut captures);
        if !captures.is_match() {
            return None;
        }
        let length = captures.get_match().map_or(0, |m| m.len());
        let mut groups: Vec<Option<String>> = (0..captures.group_len())
            .map(|index| {
                captures.get_group(index).map(|span| {
                    String::from_utf8_lossy(&window[span.start..span.end]).into_owned()
                })
            })
            .collect();
        while groups.len() > 1 && groups.last().is_some_and(Option::is_none) {
            groups.pop();
        }
        Some(TokenCaptures {
            length,
            groups: groups
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect(),
        })
    }
}

/// Captures from one anchored token match.
#[derive(Debug)]
pub struct TokenCaptures {
    /// Total bytes consumed by the whole match.
    pub length: usize,
    /// Captured group substrings, group 0 first.
    pub groups: Vec<String>,
}
