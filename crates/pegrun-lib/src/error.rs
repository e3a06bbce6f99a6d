//! Error types for grammar construction and parse setup.
//!
//! Recognition failures are never errors: they flow back through the
//! recognizer stack as `None` matches and end up as a `Failure` status on
//! the parse result. Only construction and I/O problems surface here.

use thiserror::Error;

/// Construction-time grammar errors. All are fatal at build time.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// A token pattern failed to compile.
    #[error("cannot compile token pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },

    /// Word literals must consume input.
    #[error("word literal is empty")]
    EmptyWord,

    /// Procedures and conditions never consume input, so repeating them
    /// cannot terminate.
    #[error("procedure or condition referenced with cardinality `{0}`; only `1` and `?` are allowed")]
    PredicateCardinality(char),

    /// The grammar has no axiom to try against the input.
    #[error("grammar has no axiom")]
    MissingAxiom,

    /// `prepare` must run (and no mutation may follow) before parsing.
    #[error("grammar must be prepared before parsing")]
    NotPrepared,
}

/// Errors surfaced by the parse entry points.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
