//! The grammar object model.
//!
//! A grammar is an arena of elements and references plus an axiom, an
//! optional skip element, and the dense symbol table built by [`Grammar::prepare`].
//! Elements may be shared (the graph is a DAG); references are the only way
//! elements appear as children of composites. Grammars are plain data:
//! assemble and mutate freely, call `prepare`, then parse.

mod element;
mod reference;

#[cfg(test)]
mod grammar_tests;

pub use element::{Element, ElementId, ElementType, SymbolId};
pub use reference::{Cardinality, Child, RefId, RefSpec, Reference};

pub(crate) use element::{ElementKind, TokenConfig, WordConfig};

use std::collections::VecDeque;
use std::fmt;

use crate::engine::ParsingContext;
use crate::error::GrammarError;
use crate::regex::TokenPattern;

/// An entry of the prepared symbol table: an element or a reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Element(ElementId),
    Reference(RefId),
}

/// A runtime-assembled grammar.
pub struct Grammar {
    elements: Vec<Element>,
    references: Vec<Reference>,
    axiom: Option<ElementId>,
    skip: Option<ElementId>,
    /// Indexed by [`SymbolId`]; slot 0 is empty when there is no skip.
    symbols: Vec<Option<Symbol>>,
    prepared: bool,
}

impl Grammar {
    pub fn new() -> Grammar {
        Grammar {
            elements: Vec::new(),
            references: Vec::new(),
            axiom: None,
            skip: None,
            symbols: Vec::new(),
            prepared: false,
        }
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// A literal word. Empty literals are rejected.
    pub fn word(&mut self, text: impl Into<String>) -> Result<ElementId, GrammarError> {
        let text = text.into();
        if text.is_empty() {
            return Err(GrammarError::EmptyWord);
        }
        Ok(self.push_element(ElementKind::Word(WordConfig { text })))
    }

    /// An anchored regex token.
    pub fn token(&mut self, pattern: &str) -> Result<ElementId, GrammarError> {
        let pattern = TokenPattern::compile(pattern)?;
        Ok(self.push_element(ElementKind::Token(TokenConfig { pattern })))
    }

    /// An ordered alternation over `children`.
    pub fn group<I>(&mut self, children: I) -> ElementId
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        let element = self.push_element(ElementKind::Group { first_child: None });
        for child in children {
            self.add_child(element, child);
        }
        element
    }

    /// An ordered sequence over `children`.
    pub fn rule<I>(&mut self, children: I) -> ElementId
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        let element = self.push_element(ElementKind::Rule { first_child: None });
        for child in children {
            self.add_child(element, child);
        }
        element
    }

    /// A side-effecting procedure; always a zero-length success.
    pub fn procedure<F>(&mut self, callback: F) -> ElementId
    where
        F: Fn(ElementId, &mut ParsingContext<'_>) + Send + Sync + 'static,
    {
        self.push_element(ElementKind::Procedure(Box::new(callback)))
    }

    /// A context predicate; `false` fails the match.
    pub fn condition<F>(&mut self, callback: F) -> ElementId
    where
        F: Fn(ElementId, &mut ParsingContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.push_element(ElementKind::Condition(Box::new(callback)))
    }

    /// Set an element's display name.
    pub fn set_name(&mut self, element: ElementId, name: impl Into<String>) {
        self.elements[element.index()].name = Some(name.into());
    }

    /// Append a child to a composite, auto-wrapping bare elements in a `1`
    /// reference.
    ///
    /// Panics if `parent` is not a Group or Rule.
    pub fn add_child(&mut self, parent: ElementId, child: impl Into<Child>) -> RefId {
        self.prepared = false;
        let spec = match child.into() {
            Child::Element(element) => RefSpec::to(element),
            Child::Ref(spec) => spec,
        };
        let reference = RefId(self.references.len() as u32);
        self.references.push(Reference {
            id: None,
            name: spec.name,
            cardinality: spec.cardinality,
            element: spec.element,
            next: None,
        });
        match self.elements[parent.index()].first_child() {
            None => match &mut self.elements[parent.index()].kind {
                ElementKind::Group { first_child } | ElementKind::Rule { first_child } => {
                    *first_child = Some(reference);
                }
                _ => panic!("add_child on a non-composite element"),
            },
            Some(first) => {
                let mut tail = first;
                while let Some(next) = self.references[tail.index()].next {
                    tail = next;
                }
                self.references[tail.index()].next = Some(reference);
            }
        }
        reference
    }

    /// Remove every child of a composite. The detached references stay in
    /// the arena but become unreachable, so `prepare` assigns them no ids.
    ///
    /// Panics if `parent` is not a Group or Rule.
    pub fn clear_children(&mut self, parent: ElementId) {
        self.prepared = false;
        match &mut self.elements[parent.index()].kind {
            ElementKind::Group { first_child } | ElementKind::Rule { first_child } => {
                *first_child = None;
            }
            _ => panic!("clear_children on a non-composite element"),
        }
    }

    pub fn set_axiom(&mut self, element: ElementId) {
        self.prepared = false;
        self.axiom = Some(element);
    }

    pub fn set_skip(&mut self, element: ElementId) {
        self.prepared = false;
        self.skip = Some(element);
    }

    fn push_element(&mut self, kind: ElementKind) -> ElementId {
        self.prepared = false;
        let id = ElementId(self.elements.len() as u32);
        self.elements.push(Element {
            id: None,
            name: None,
            kind,
        });
        id
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn axiom(&self) -> Option<ElementId> {
        self.axiom
    }

    pub fn skip(&self) -> Option<ElementId> {
        self.skip
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.index()]
    }

    pub fn reference(&self, id: RefId) -> &Reference {
        &self.references[id.index()]
    }

    /// Look up a prepared symbol by id.
    pub fn symbol(&self, id: SymbolId) -> Option<Symbol> {
        self.symbols.get(id as usize).copied().flatten()
    }

    /// Size of the symbol table (`max_id + 1` after `prepare`).
    pub fn symbols_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Symbol id of an element; unassigned before `prepare`.
    pub fn element_symbol(&self, id: ElementId) -> Option<SymbolId> {
        self.elements[id.index()].id
    }

    /// Symbol id of a reference; unassigned before `prepare`.
    pub fn reference_symbol(&self, id: RefId) -> Option<SymbolId> {
        self.references[id.index()].id
    }

    /// Visit every element and reference reachable from `root`, each exactly
    /// once, in breadth-first declaration order (the `prepare` id order).
    pub fn walk(&self, root: ElementId, callback: &mut dyn FnMut(Symbol)) {
        let mut seen_elements = vec![false; self.elements.len()];
        let mut seen_references = vec![false; self.references.len()];
        let mut queue = VecDeque::from([Symbol::Element(root)]);
        while let Some(symbol) = queue.pop_front() {
            match symbol {
                Symbol::Element(element) => {
                    if seen_elements[element.index()] {
                        continue;
                    }
                    seen_elements[element.index()] = true;
                    callback(symbol);
                    let mut child = self.elements[element.index()].first_child();
                    while let Some(reference) = child {
                        queue.push_back(Symbol::Reference(reference));
                        child = self.references[reference.index()].next;
                    }
                }
                Symbol::Reference(reference) => {
                    if seen_references[reference.index()] {
                        continue;
                    }
                    seen_references[reference.index()] = true;
                    callback(symbol);
                    queue.push_back(Symbol::Element(self.references[reference.index()].element));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Preparation
    // ------------------------------------------------------------------

    /// Assign dense symbol ids to every element and reference reachable from
    /// the axiom and the skip element, and build the symbol table.
    ///
    /// The walk is breadth-first; nodes already visited terminate the branch,
    /// which is what keeps recursive grammars (`Expression` referencing
    /// itself through `Suffix`) from looping. The skip element takes id 0,
    /// the axiom subtree 1..N, and the skip subtree follows. A skip element
    /// that is itself reachable from the axiom has its subtree ids assigned
    /// within the axiom range.
    pub fn prepare(&mut self) -> Result<(), GrammarError> {
        let axiom = self.axiom.ok_or(GrammarError::MissingAxiom)?;
        self.validate()?;

        for element in &mut self.elements {
            element.id = None;
        }
        for reference in &mut self.references {
            reference.id = None;
        }

        let mut seen_elements = vec![false; self.elements.len()];
        let mut seen_references = vec![false; self.references.len()];
        let mut next: SymbolId = 1;

        if let Some(skip) = self.skip {
            self.elements[skip.index()].id = Some(0);
        }
        self.assign_ids(
            Symbol::Element(axiom),
            &mut seen_elements,
            &mut seen_references,
            &mut next,
        );
        if let Some(skip) = self.skip {
            self.assign_ids(
                Symbol::Element(skip),
                &mut seen_elements,
                &mut seen_references,
                &mut next,
            );
        }

        self.symbols = vec![None; next as usize];
        for (index, element) in self.elements.iter().enumerate() {
            if let Some(id) = element.id {
                debug_assert!(self.symbols[id as usize].is_none());
                self.symbols[id as usize] = Some(Symbol::Element(ElementId(index as u32)));
            }
        }
        for (index, reference) in self.references.iter().enumerate() {
            if let Some(id) = reference.id {
                debug_assert!(self.symbols[id as usize].is_none());
                self.symbols[id as usize] = Some(Symbol::Reference(RefId(index as u32)));
            }
        }

        self.prepared = true;
        Ok(())
    }

    fn assign_ids(
        &mut self,
        root: Symbol,
        seen_elements: &mut [bool],
        seen_references: &mut [bool],
        next: &mut SymbolId,
    ) {
        let mut queue = VecDeque::from([root]);
        while let Some(symbol) = queue.pop_front() {
            match symbol {
                Symbol::Element(element) => {
                    if seen_elements[element.index()] {
                        continue;
                    }
                    seen_elements[element.index()] = true;
                    if self.elements[element.index()].id.is_none() {
                        self.elements[element.index()].id = Some(*next);
                        *next += 1;
                    }
                    let mut child = self.elements[element.index()].first_child();
                    while let Some(reference) = child {
                        queue.push_back(Symbol::Reference(reference));
                        child = self.references[reference.index()].next;
                    }
                }
                Symbol::Reference(reference) => {
                    if seen_references[reference.index()] {
                        continue;
                    }
                    seen_references[reference.index()] = true;
                    self.references[reference.index()].id = Some(*next);
                    *next += 1;
                    queue.push_back(Symbol::Element(self.references[reference.index()].element));
                }
            }
        }
    }

    fn validate(&self) -> Result<(), GrammarError> {
        for reference in &self.references {
            let target = &self.elements[reference.element.index()];
            if target.element_type().is_predicate() && reference.cardinality.is_many() {
                return Err(GrammarError::PredicateCardinality(
                    reference.cardinality.as_char(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for Grammar {
    fn default() -> Grammar {
        Grammar::new()
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("elements", &self.elements.len())
            .field("references", &self.references.len())
            .field("axiom", &self.axiom)
            .field("skip", &self.skip)
            .field("prepared", &self.prepared)
            .finish()
    }
}
