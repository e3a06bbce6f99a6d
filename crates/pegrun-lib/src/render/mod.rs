//! Match tree serialization.
//!
//! Rendering follows the element behind each match: Words emit their
//! literal, Tokens their first capture (or the full group list when more
//! than one group captured), composites wrap their children, procedures and
//! conditions are omitted. Reference matches with cardinality `1`/`?`
//! unwrap to their single child; `+`/`*` render as lists.

mod json;
mod xml;

#[cfg(test)]
mod render_tests;

pub use json::{match_to_json, write_json};
pub use xml::{match_to_xml, write_xml};

use crate::grammar::Grammar;
use crate::matches::Match;

/// Procedure and condition matches carry no content and are left out of
/// rendered children.
fn is_silent(grammar: &Grammar, matched: &Match) -> bool {
    matched.element_type(grammar).is_predicate()
}
