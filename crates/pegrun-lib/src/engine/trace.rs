//! Recognition tracing.
//!
//! Recognizers are generic over a [`Tracer`]; the [`NoopTracer`] methods are
//! empty and compile away entirely, while [`PrintTracer`] renders the
//! recognition walk to stderr with depth-based indentation. Tracing is
//! suppressed while the skip element runs.

use crate::engine::context::ScopeOp;
use crate::grammar::{Cardinality, ElementType, SymbolId};

/// Fixed whitespace pool that indentation is sliced from.
const INDENT: &str = "                                                                                ";

/// Indentation for a recognizer at `depth`, two spaces per level, capped at
/// the pool width.
pub fn indent(depth: u32) -> &'static str {
    let width = (depth as usize % 40) * 2;
    &INDENT[..width]
}

/// Where a trace event happened.
#[derive(Clone, Copy, Debug)]
pub struct Site<'a> {
    pub kind: ElementType,
    pub name: Option<&'a str>,
    pub id: Option<SymbolId>,
    pub depth: u32,
}

impl Site<'_> {
    fn label(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => format!("#{}", self.id.map_or(-1, |id| id as i64)),
        }
    }
}

/// Hooks invoked by the recognizers.
///
/// Every method has an empty default body, so a tracer only implements what
/// it cares about and `NoopTracer` disappears at compile time.
pub trait Tracer {
    /// A composite (or the axiom) starts a speculative attempt.
    fn trace_attempt(&mut self, _site: Site<'_>, _offset: usize, _lines: usize) {}

    /// An element or reference matched `[offset, end)`.
    fn trace_match(&mut self, _site: Site<'_>, _offset: usize, _end: usize, _lines: usize) {}

    /// An element or reference failed at `offset`.
    fn trace_failure(&mut self, _site: Site<'_>, _offset: usize, _lines: usize) {}

    /// A `+`/`*` reference begins iteration `count`.
    fn trace_iteration(&mut self, _site: Site<'_>, _count: usize, _cardinality: Cardinality) {}

    /// The skip element consumed `skipped` bytes between matches.
    fn trace_skip(&mut self, _skipped: usize, _depth: u32) {}

    /// A rule pushed or popped its variable scope.
    fn trace_scope(&mut self, _op: ScopeOp, _depth: u32) {}
}

/// Tracer that does nothing; calls are optimized away.
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// How much of the walk [`PrintTracer`] renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Matches and failures only.
    Compact,
    /// Attempts, iterations, skips and scopes too.
    #[default]
    Full,
}

/// Tracer that renders the recognition walk to stderr.
#[derive(Debug, Default)]
pub struct PrintTracer {
    verbosity: Verbosity,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity) -> PrintTracer {
        PrintTracer { verbosity }
    }

    fn full(&self) -> bool {
        self.verbosity == Verbosity::Full
    }
}

impl Tracer for PrintTracer {
    fn trace_attempt(&mut self, site: Site<'_>, offset: usize, lines: usize) {
        if self.full() {
            eprintln!(
                "~ {}{} {} at {}:{}",
                indent(site.depth),
                site.kind.as_char(),
                site.label(),
                lines,
                offset,
            );
        }
    }

    fn trace_match(&mut self, site: Site<'_>, offset: usize, end: usize, lines: usize) {
        eprintln!(
            "M {}{} {} matched {}:{}-{}",
            indent(site.depth),
            site.kind.as_char(),
            site.label(),
            lines,
            offset,
            end,
        );
    }

    fn trace_failure(&mut self, site: Site<'_>, offset: usize, lines: usize) {
        eprintln!(
            "F {}{} {} failed at {}:{}",
            indent(site.depth),
            site.kind.as_char(),
            site.label(),
            lines,
            offset,
        );
    }

    fn trace_iteration(&mut self, site: Site<'_>, count: usize, cardinality: Cardinality) {
        if self.full() {
            eprintln!(
                "~ {}[{}]({}) {}",
                indent(site.depth),
                count,
                cardinality.as_char(),
                site.label(),
            );
        }
    }

    fn trace_skip(&mut self, skipped: usize, depth: u32) {
        if self.full() {
            eprintln!("~ {}skipped {}", indent(depth), skipped);
        }
    }

    fn trace_scope(&mut self, op: ScopeOp, depth: u32) {
        if self.full() {
            let sign = match op {
                ScopeOp::Push => '+',
                ScopeOp::Pop => '-',
            };
            eprintln!("~ {}scope {}{}", indent(depth), sign, depth);
        }
    }
}
