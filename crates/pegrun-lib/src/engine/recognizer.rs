//! The recognition driver: element dispatch, cardinality loops, the skip
//! protocol, and offset-based backtracking.
//!
//! The contract shared by every recognizer: on success the cursor has been
//! advanced past the matched bytes; on failure the cursor is back where it
//! was before the call. Leaves restore trivially (they never advance on
//! failure); composites record `(offset, lines)` on entry and backtrack.

use std::time::Instant;

use crate::cursor::Cursor;
use crate::engine::context::{ParseLimits, ParsingContext};
use crate::engine::result::ParsingResult;
use crate::engine::trace::{NoopTracer, Site, Tracer};
use crate::error::{GrammarError, ParseError};
use crate::grammar::{ElementId, ElementKind, Grammar, RefId};
use crate::matches::{Match, Origin, TokenData, link_chain};

impl Grammar {
    /// Parse borrowed text against the prepared grammar.
    pub fn parse_string<'s>(&self, text: &'s str) -> Result<ParsingResult<'s>, ParseError> {
        self.parse_cursor(Cursor::from_string(text))
    }

    /// Open `path` and parse it against the prepared grammar.
    pub fn parse_path(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<ParsingResult<'static>, ParseError> {
        self.parse_cursor(Cursor::open(path)?)
    }

    /// Parse from an existing cursor with default limits and no tracing.
    pub fn parse_cursor<'i>(&self, cursor: Cursor<'i>) -> Result<ParsingResult<'i>, ParseError> {
        self.parse_cursor_with(cursor, ParseLimits::default(), &mut NoopTracer)
    }

    /// Parse from an existing cursor, with explicit limits and a tracer.
    ///
    /// The grammar must be prepared and unmutated since; each parse owns its
    /// context and cursor, so one prepared grammar may serve several parses
    /// (even concurrently) through `&self`.
    pub fn parse_cursor_with<'i, T: Tracer>(
        &self,
        cursor: Cursor<'i>,
        limits: ParseLimits,
        tracer: &mut T,
    ) -> Result<ParsingResult<'i>, ParseError> {
        if !self.is_prepared() {
            return Err(GrammarError::NotPrepared.into());
        }
        let axiom = self.axiom().ok_or(GrammarError::MissingAxiom)?;
        let mut context = ParsingContext::new(cursor, self.symbols_count(), limits);
        let started = Instant::now();
        let matched = context.recognize(self, axiom, tracer);
        context.stats.parse_time = started.elapsed();
        context.stats.bytes_read = context.cursor.offset();
        Ok(ParsingResult::new(matched, context))
    }
}

impl ParsingContext<'_> {
    /// Recognize one element at the current cursor position.
    pub(crate) fn recognize<T: Tracer>(
        &mut self,
        grammar: &Grammar,
        element: ElementId,
        tracer: &mut T,
    ) -> Option<Box<Match>> {
        if self.recursion >= self.limits.recursion_limit {
            self.recursion_limit_hit = true;
            return None;
        }
        self.recursion += 1;
        let result = match &grammar.element(element).kind {
            ElementKind::Word(config) => {
                let matched = {
                    let text = config.text.as_bytes();
                    let window = self.cursor.window();
                    window.len() >= text.len() && &window[..text.len()] == text
                };
                self.finish_word(grammar, element, config.text.len(), matched, tracer)
            }
            ElementKind::Token(config) => {
                let captures = config.pattern.match_at(self.cursor.window());
                self.finish_token(grammar, element, captures, tracer)
            }
            ElementKind::Group { .. } => self.recognize_group(grammar, element, tracer),
            ElementKind::Rule { .. } => self.recognize_rule(grammar, element, tracer),
            ElementKind::Procedure(callback) => {
                callback(element, self);
                let matched = Match::new(
                    Origin::Element(element),
                    self.cursor.offset(),
                    0,
                    self.cursor.lines(),
                );
                self.register_success(grammar.element_symbol(element), &matched);
                Some(matched)
            }
            ElementKind::Condition(callback) => {
                if callback(element, self) {
                    let matched = Match::new(
                        Origin::Element(element),
                        self.cursor.offset(),
                        0,
                        self.cursor.lines(),
                    );
                    self.register_success(grammar.element_symbol(element), &matched);
                    if !self.skipping {
                        tracer.trace_match(
                            element_site(grammar, element, self.depth),
                            matched.offset(),
                            matched.offset(),
                            matched.line(),
                        );
                    }
                    Some(matched)
                } else {
                    self.register_failure(grammar.element_symbol(element));
                    if !self.skipping {
                        tracer.trace_failure(
                            element_site(grammar, element, self.depth),
                            self.cursor.offset(),
                            self.cursor.lines(),
                        );
                    }
                    None
                }
            }
        };
        self.recursion -= 1;
        result
    }

    fn finish_word<T: Tracer>(
        &mut self,
        grammar: &Grammar,
        element: ElementId,
        length: usize,
        matched: bool,
        tracer: &mut T,
    ) -> Option<Box<Match>> {
        let offset = self.cursor.offset();
        let lines = self.cursor.lines();
        if matched {
            let result = Match::new(Origin::Element(element), offset, length, lines);
            self.cursor.move_by(length as isize);
            self.register_success(grammar.element_symbol(element), &result);
            if !self.skipping {
                tracer.trace_match(
                    element_site(grammar, element, self.depth),
                    offset,
                    self.cursor.offset(),
                    lines,
                );
            }
            Some(result)
        } else {
            self.register_failure(grammar.element_symbol(element));
            if !self.skipping {
                tracer.trace_failure(element_site(grammar, element, self.depth), offset, lines);
            }
            None
        }
    }

    fn finish_token<T: Tracer>(
        &mut self,
        grammar: &Grammar,
        element: ElementId,
        captures: Option<crate::regex::TokenCaptures>,
        tracer: &mut T,
    ) -> Option<Box<Match>> {
        let offset = self.cursor.offset();
        let lines = self.cursor.lines();
        match captures {
            Some(captures) => {
                let mut result =
                    Match::new(Origin::Element(element), offset, captures.length, lines);
                result.data = Some(TokenData::new(captures.groups));
                self.cursor.move_by(captures.length as isize);
                self.register_success(grammar.element_symbol(element), &result);
                if !self.skipping {
                    tracer.trace_match(
                        element_site(grammar, element, self.depth),
                        offset,
                        self.cursor.offset(),
                        lines,
                    );
                }
                Some(result)
            }
            None => {
                self.register_failure(grammar.element_symbol(element));
                if !self.skipping {
                    tracer.trace_failure(element_site(grammar, element, self.depth), offset, lines);
                }
                None
            }
        }
    }

    /// Ordered alternation: first matching child wins. Alternatives are
    /// tried cleanly, with no skip between them.
    fn recognize_group<T: Tracer>(
        &mut self,
        grammar: &Grammar,
        element: ElementId,
        tracer: &mut T,
    ) -> Option<Box<Match>> {
        let offset = self.cursor.offset();
        let lines = self.cursor.lines();
        if !self.skipping {
            tracer.trace_attempt(element_site(grammar, element, self.depth), offset, lines);
        }
        let mut child = grammar.element(element).first_child();
        while let Some(reference) = child {
            if let Some(matched) = self.recognize_reference(grammar, reference, tracer) {
                let mut result =
                    Match::new(Origin::Element(element), offset, matched.length(), lines);
                result.children = Some(matched);
                self.register_success(grammar.element_symbol(element), &result);
                if !self.skipping {
                    tracer.trace_match(
                        element_site(grammar, element, self.depth),
                        offset,
                        self.cursor.offset(),
                        lines,
                    );
                }
                return Some(result);
            }
            child = grammar.reference(reference).next();
        }
        if self.cursor.offset() != offset {
            self.cursor.backtrack(offset, lines);
        }
        self.register_failure(grammar.element_symbol(element));
        if !self.skipping {
            tracer.trace_failure(element_site(grammar, element, self.depth), offset, lines);
        }
        None
    }

    /// Ordered sequence. A failing child gets one shot at the skip protocol;
    /// if skip consumed anything the child is retried, otherwise the whole
    /// rule fails and the cursor backtracks to the entry position.
    fn recognize_rule<T: Tracer>(
        &mut self,
        grammar: &Grammar,
        element: ElementId,
        tracer: &mut T,
    ) -> Option<Box<Match>> {
        let offset = self.cursor.offset();
        let lines = self.cursor.lines();
        if !self.skipping {
            tracer.trace_attempt(element_site(grammar, element, self.depth), offset, lines);
        }
        self.push_scope();
        if !self.skipping {
            tracer.trace_scope(crate::engine::ScopeOp::Push, self.depth);
        }

        let mut chain: Vec<Box<Match>> = Vec::new();
        let mut failed = false;
        let mut child = grammar.element(element).first_child();
        while let Some(reference) = child {
            let mut matched = self.recognize_reference(grammar, reference, tracer);
            if matched.is_none() {
                let skipped = self.apply_skip(grammar, tracer);
                if skipped > 0 {
                    matched = self.recognize_reference(grammar, reference, tracer);
                }
            }
            match matched {
                Some(matched) => chain.push(matched),
                None => {
                    failed = true;
                    break;
                }
            }
            child = grammar.reference(reference).next();
        }

        if !self.skipping {
            tracer.trace_scope(crate::engine::ScopeOp::Pop, self.depth);
        }
        self.pop_scope();

        if failed || chain.is_empty() {
            if self.cursor.offset() != offset {
                self.cursor.backtrack(offset, lines);
            }
            self.register_failure(grammar.element_symbol(element));
            if !self.skipping {
                tracer.trace_failure(element_site(grammar, element, self.depth), offset, lines);
            }
            return None;
        }

        let length = chain.last().map_or(0, |last| last.end_offset()) - offset;
        let mut result = Match::new(Origin::Element(element), offset, length, lines);
        result.children = link_chain(chain);
        self.register_success(grammar.element_symbol(element), &result);
        if !self.skipping {
            tracer.trace_match(
                element_site(grammar, element, self.depth),
                offset,
                self.cursor.offset(),
                lines,
            );
        }
        Some(result)
    }

    /// Recognize a reference: loop its element per cardinality, applying the
    /// skip protocol between failed iterations.
    ///
    /// The result is a reference-level match whose children are the
    /// individual element matches; `?`/`*` produce a zero-length success
    /// with no children when nothing matched. A zero-length element match
    /// terminates the loop, which is the sole defense against unbounded
    /// iteration on nullable `+`/`*` targets.
    fn recognize_reference<T: Tracer>(
        &mut self,
        grammar: &Grammar,
        reference: RefId,
        tracer: &mut T,
    ) -> Option<Box<Match>> {
        let cardinality = grammar.reference(reference).cardinality();
        let element = grammar.reference(reference).element();
        let is_predicate = grammar.element(element).element_type().is_predicate();

        let offset = self.cursor.offset();
        let lines = self.cursor.lines();
        // End of the last successful iteration; trailing skip consumption is
        // rolled back to here.
        let mut end_offset = offset;
        let mut end_lines = lines;
        let mut chain: Vec<Box<Match>> = Vec::new();

        loop {
            // Predicates still run at end of input.
            if !(self.cursor.has_more() || is_predicate) {
                break;
            }
            if cardinality.is_many() && !self.skipping {
                tracer.trace_iteration(
                    reference_site(grammar, reference, self.depth),
                    chain.len(),
                    cardinality,
                );
            }
            let iteration_offset = self.cursor.offset();
            match self.recognize(grammar, element, tracer) {
                Some(matched) => {
                    let parsed = self.cursor.offset() - iteration_offset;
                    end_offset = self.cursor.offset();
                    end_lines = self.cursor.lines();
                    chain.push(matched);
                    if parsed == 0 || !cardinality.is_many() {
                        break;
                    }
                }
                None => {
                    if self.apply_skip(grammar, tracer) == 0 {
                        break;
                    }
                }
            }
        }

        if self.cursor.offset() != end_offset {
            self.cursor.backtrack(end_offset, end_lines);
        }

        let matched = !chain.is_empty();
        if matched || cardinality.allows_empty() {
            let length = self.cursor.offset() - offset;
            let mut result = Match::new(Origin::Reference(reference), offset, length, lines);
            result.children = link_chain(chain);
            self.register_success(grammar.reference_symbol(reference), &result);
            Some(result)
        } else {
            debug_assert_eq!(self.cursor.offset(), offset);
            self.register_failure(grammar.reference_symbol(reference));
            None
        }
    }

    /// The skip protocol: run the grammar's skip element once and report how
    /// many bytes it consumed. The `skipping` flag guards re-entry so a skip
    /// rule containing composites cannot trigger skip itself, and mutes
    /// match registration and tracing for everything the skip does.
    fn apply_skip<T: Tracer>(&mut self, grammar: &Grammar, tracer: &mut T) -> usize {
        if self.skipping {
            return 0;
        }
        let Some(skip) = grammar.skip() else {
            return 0;
        };
        self.skipping = true;
        let offset = self.cursor.offset();
        let _ = self.recognize(grammar, skip, tracer);
        let skipped = self.cursor.offset() - offset;
        self.skipping = false;
        if skipped > 0 {
            tracer.trace_skip(skipped, self.depth);
        }
        skipped
    }
}

fn element_site<'g>(grammar: &'g Grammar, element: ElementId, depth: u32) -> Site<'g> {
    let element = grammar.element(element);
    Site {
        kind: element.element_type(),
        name: element.name(),
        id: element.id(),
        depth,
    }
}

fn reference_site<'g>(grammar: &'g Grammar, reference: RefId, depth: u32) -> Site<'g> {
    let reference = grammar.reference(reference);
    let element = grammar.element(reference.element());
    Site {
        kind: element.element_type(),
        name: reference.name().or(element.name()),
        id: reference.id(),
        depth,
    }
}
