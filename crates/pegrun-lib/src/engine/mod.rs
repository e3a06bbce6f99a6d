//! The runtime engine: parsing context, recognizers, tracing, results.
//!
//! Recognition is a single-threaded recursive walk of the element graph.
//! All mutable state lives on the [`ParsingContext`]; the grammar is shared
//! and immutable during a parse.

mod context;
mod recognizer;
mod result;
mod stats;
mod trace;
mod variables;

#[cfg(test)]
mod variables_tests;

pub use context::{LastMatch, ParseLimits, ParsingContext, ScopeHook, ScopeOp};
pub use result::{ParseStatus, ParsingResult};
pub use stats::ParsingStats;
pub use trace::{NoopTracer, PrintTracer, Site, Tracer, Verbosity, indent};
pub use variables::{DEPTH_KEY, Value, Variables};
