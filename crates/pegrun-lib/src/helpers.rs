//! Ready-made procedures and conditions for indentation-sensitive grammars.
//!
//! [`indent`] and [`dedent`] adjust the expected indentation level stored in
//! the context variable [`INDENT_VAR`]; [`check_indent`] matches only when
//! the current line's leading tab count equals that level. Because variables
//! are scoped to rule attempts, an `indent`/`dedent` pair placed inside one
//! rule is transactional with respect to that rule failing.

use crate::engine::ParsingContext;
use crate::grammar::{ElementId, Grammar};

/// Context variable updated by [`indent`]/[`dedent`] and read by
/// [`check_indent`].
pub const INDENT_VAR: &str = "indent";

/// Procedure raising the expected indentation level by one.
pub fn indent(grammar: &mut Grammar) -> ElementId {
    grammar.procedure(|_, context| {
        let level = context.get_int(INDENT_VAR).unwrap_or(0);
        context.set(INDENT_VAR, level + 1);
    })
}

/// Procedure lowering the expected indentation level by one.
pub fn dedent(grammar: &mut Grammar) -> ElementId {
    grammar.procedure(|_, context| {
        let level = context.get_int(INDENT_VAR).unwrap_or(0);
        context.set(INDENT_VAR, (level - 1).max(0));
    })
}

/// Condition matching when the current line's leading tabs equal the
/// expected indentation level.
pub fn check_indent(grammar: &mut Grammar) -> ElementId {
    grammar.condition(|_, context| {
        let expected = context.get_int(INDENT_VAR).unwrap_or(0);
        current_line_indent(context) == expected
    })
}

/// Tabs between the previous line break and the current offset.
fn current_line_indent(context: &ParsingContext<'_>) -> i64 {
    let bytes = context.bytes();
    let offset = context.offset();
    let line_start = bytes[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |position| position + 1);
    bytes[line_start..offset]
        .iter()
        .take_while(|&&b| b == b'\t')
        .count() as i64
}
