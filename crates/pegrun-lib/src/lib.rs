//! Runtime PEG engine.
//!
//! Grammars are plain data structures assembled (and mutable) at runtime,
//! not compiled artifacts: build elements into a [`Grammar`], call
//! [`Grammar::prepare`] to assign symbol ids, then match inputs with
//! backtracking, skip rules and context-sensitive predicates. The parse
//! returns an owned [`Match`] tree that a [`Processor`] or the [`render`]
//! writers can walk.
//!
//! # Example
//!
//! ```
//! use pegrun_lib::{Child, Grammar, RefSpec};
//!
//! let mut g = Grammar::new();
//! let ws = g.token(r"\s+")?;
//! let number = g.token(r"\d+")?;
//! let op = g.token(r"[+\-*/]")?;
//! let suffix = g.rule([
//!     RefSpec::to(op).name("op"),
//!     RefSpec::to(number).name("value"),
//! ]);
//! let expr = g.rule([
//!     Child::from(number),
//!     RefSpec::to(suffix).many_optional().into(),
//! ]);
//! g.set_axiom(expr);
//! g.set_skip(ws);
//! g.prepare()?;
//!
//! let result = g.parse_string("10 + 20 / 5")?;
//! assert!(result.is_success());
//! assert_eq!(result.remaining(), 0);
//! # Ok::<(), pegrun_lib::ParseError>(())
//! ```

pub mod cursor;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod helpers;
pub mod matches;
pub mod processor;
pub mod regex;
pub mod render;

#[cfg(test)]
mod cursor_tests;

pub use cursor::{Cursor, CursorStatus};
pub use engine::{
    LastMatch, NoopTracer, ParseLimits, ParseStatus, ParsingContext, ParsingResult, ParsingStats,
    PrintTracer, ScopeOp, Site, Tracer, Value, Variables, Verbosity,
};
pub use error::{GrammarError, ParseError};
pub use grammar::{
    Cardinality, Child, Element, ElementId, ElementType, Grammar, RefId, RefSpec, Reference,
    Symbol, SymbolId,
};
pub use matches::{Match, Origin, TokenData};
pub use processor::Processor;
