//! Parsing context: the mutable state threaded through every recognizer.

use std::borrow::Cow;

use serde::Serialize;

use crate::cursor::Cursor;
use crate::engine::stats::ParsingStats;
use crate::engine::variables::{Value, Variables};
use crate::grammar::SymbolId;
use crate::matches::Match;

/// The most recent successful, non-empty match whose end reached furthest
/// into the input. Survives backtracking, which is what makes it a usable
/// error-location heuristic when the whole parse fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LastMatch {
    pub offset: usize,
    pub length: usize,
    pub symbol: SymbolId,
}

impl LastMatch {
    pub fn end_offset(&self) -> usize {
        self.offset + self.length
    }
}

/// Scope bracket operations reported to the scope hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeOp {
    Push,
    Pop,
}

/// Hook invoked around rule scope brackets.
pub type ScopeHook = fn(&mut ParsingContext<'_>, ScopeOp);

/// Runtime limits for one parse.
#[derive(Clone, Copy, Debug)]
pub struct ParseLimits {
    pub(crate) recursion_limit: u32,
}

impl Default for ParseLimits {
    fn default() -> ParseLimits {
        ParseLimits {
            recursion_limit: 1024,
        }
    }
}

impl ParseLimits {
    pub fn new() -> ParseLimits {
        ParseLimits::default()
    }

    /// Maximum recognizer nesting depth (default: 1,024). Exceeding it fails
    /// the current branch, so cyclic grammars degrade to a failed parse.
    pub fn recursion_limit(mut self, limit: u32) -> ParseLimits {
        self.recursion_limit = limit;
        self
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Mutable state of one parse: the cursor, the variable stack, statistics,
/// and the skip/backtrack bookkeeping.
pub struct ParsingContext<'i> {
    pub(crate) cursor: Cursor<'i>,
    pub(crate) stats: ParsingStats,
    pub(crate) variables: Variables,
    pub(crate) depth: u32,
    pub(crate) recursion: u32,
    pub(crate) limits: ParseLimits,
    /// Set while the skip element runs; guards re-entry and mutes
    /// registration and tracing.
    pub(crate) skipping: bool,
    pub(crate) recursion_limit_hit: bool,
    pub(crate) last_match: Option<LastMatch>,
    pub(crate) scope_hook: Option<ScopeHook>,
}

impl<'i> ParsingContext<'i> {
    pub(crate) fn new(cursor: Cursor<'i>, symbols: usize, limits: ParseLimits) -> ParsingContext<'i> {
        ParsingContext {
            cursor,
            stats: ParsingStats::new(symbols),
            variables: Variables::new(),
            depth: 0,
            recursion: 0,
            limits,
            skipping: false,
            recursion_limit_hit: false,
            last_match: None,
            scope_hook: None,
        }
    }

    pub fn cursor(&self) -> &Cursor<'i> {
        &self.cursor
    }

    /// Current byte offset of the cursor.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    /// Peek at an absolute offset within the loaded window.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.cursor.byte_at(offset)
    }

    /// All loaded input bytes.
    pub fn bytes(&self) -> &[u8] {
        self.cursor.bytes()
    }

    /// Loaded input as text.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.cursor.bytes())
    }

    pub fn stats(&self) -> &ParsingStats {
        &self.stats
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    /// Most recent binding of a context variable.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.variables.get_int(key)
    }

    /// Bind a context variable at the current scope depth.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.variables.set(key, value);
    }

    /// Rule nesting depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn last_match(&self) -> Option<LastMatch> {
        self.last_match
    }

    /// True when a branch was failed because the recursion limit was hit.
    pub fn recursion_limit_hit(&self) -> bool {
        self.recursion_limit_hit
    }

    /// Install a hook fired around every rule scope push/pop.
    pub fn on_scope(&mut self, hook: ScopeHook) {
        self.scope_hook = Some(hook);
    }

    pub(crate) fn push_scope(&mut self) {
        self.variables.push();
        if let Some(hook) = self.scope_hook {
            hook(self, ScopeOp::Push);
        }
        self.depth += 1;
    }

    pub(crate) fn pop_scope(&mut self) {
        if let Some(hook) = self.scope_hook {
            hook(self, ScopeOp::Pop);
        }
        self.variables.pop();
        self.depth = self.depth.saturating_sub(1);
    }

    /// Record a successful match. Muted while skipping; empty matches never
    /// advance the last-match record.
    pub(crate) fn register_success(&mut self, symbol: Option<SymbolId>, matched: &Match) {
        if self.skipping {
            return;
        }
        let Some(symbol) = symbol else { return };
        self.stats.record_success(symbol);
        if matched.length() == 0 {
            return;
        }
        let beyond = self
            .last_match
            .is_none_or(|last| last.end_offset() < matched.end_offset());
        if beyond {
            self.last_match = Some(LastMatch {
                offset: matched.offset(),
                length: matched.length(),
                symbol,
            });
        }
    }

    /// Record a failed recognition. Muted while skipping.
    pub(crate) fn register_failure(&mut self, symbol: Option<SymbolId>) {
        if self.skipping {
            return;
        }
        let Some(symbol) = symbol else { return };
        let offset = self.cursor.offset();
        self.stats.record_failure(symbol, offset);
    }
}
