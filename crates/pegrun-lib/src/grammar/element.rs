//! Parsing elements: the node kinds of the grammar graph.

use std::fmt;

use crate::engine::ParsingContext;
use crate::grammar::reference::RefId;
use crate::regex::TokenPattern;

/// Dense symbol id assigned by [`Grammar::prepare`](crate::Grammar::prepare).
///
/// Elements and references draw from the same counter: the skip element (if
/// any) takes 0, the axiom subtree 1..N, the skip subtree follows.
pub type SymbolId = u32;

/// Handle of an element in the grammar arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) u32);

impl ElementId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Callback run by a Procedure element for its side effects on the context.
pub type ProcedureFn = Box<dyn Fn(ElementId, &mut ParsingContext<'_>) + Send + Sync>;

/// Callback evaluated by a Condition element; `false` fails the match.
pub type ConditionFn = Box<dyn Fn(ElementId, &mut ParsingContext<'_>) -> bool + Send + Sync>;

/// Discriminant of an element kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum ElementType {
    Word,
    Token,
    Group,
    Rule,
    Procedure,
    Condition,
}

impl ElementType {
    /// One-character code used in diagnostics.
    pub fn as_char(self) -> char {
        match self {
            ElementType::Word => 'W',
            ElementType::Token => 'T',
            ElementType::Group => 'G',
            ElementType::Rule => 'R',
            ElementType::Procedure => 'p',
            ElementType::Condition => 'c',
        }
    }

    /// Groups and rules hold children.
    pub fn is_composite(self) -> bool {
        matches!(self, ElementType::Group | ElementType::Rule)
    }

    /// Procedures and conditions never consume input.
    pub fn is_predicate(self) -> bool {
        matches!(self, ElementType::Procedure | ElementType::Condition)
    }
}

pub(crate) struct WordConfig {
    pub text: String,
}

pub(crate) struct TokenConfig {
    pub pattern: TokenPattern,
}

pub(crate) enum ElementKind {
    Word(WordConfig),
    Token(TokenConfig),
    /// Ordered alternation: first matching child wins.
    Group { first_child: Option<RefId> },
    /// Ordered sequence: every child must match.
    Rule { first_child: Option<RefId> },
    Procedure(ProcedureFn),
    Condition(ConditionFn),
}

/// A parsing element stored in the grammar arena.
pub struct Element {
    pub(crate) id: Option<SymbolId>,
    pub(crate) name: Option<String>,
    pub(crate) kind: ElementKind,
}

impl Element {
    /// Symbol id, assigned by `prepare`.
    pub fn id(&self) -> Option<SymbolId> {
        self.id
    }

    /// Display name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn element_type(&self) -> ElementType {
        match self.kind {
            ElementKind::Word(_) => ElementType::Word,
            ElementKind::Token(_) => ElementType::Token,
            ElementKind::Group { .. } => ElementType::Group,
            ElementKind::Rule { .. } => ElementType::Rule,
            ElementKind::Procedure(_) => ElementType::Procedure,
            ElementKind::Condition(_) => ElementType::Condition,
        }
    }

    /// The literal of a Word element.
    pub fn word_text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Word(config) => Some(&config.text),
            _ => None,
        }
    }

    /// The source pattern of a Token element.
    pub fn token_pattern(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Token(config) => Some(config.pattern.pattern()),
            _ => None,
        }
    }

    /// First child reference of a composite.
    pub fn first_child(&self) -> Option<RefId> {
        match self.kind {
            ElementKind::Group { first_child } | ElementKind::Rule { first_child } => first_child,
            _ => None,
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Element");
        s.field("type", &self.element_type())
            .field("id", &self.id)
            .field("name", &self.name);
        match &self.kind {
            ElementKind::Word(config) => {
                s.field("word", &config.text);
            }
            ElementKind::Token(config) => {
                s.field("pattern", &config.pattern.pattern());
            }
            ElementKind::Group { first_child } | ElementKind::Rule { first_child } => {
                s.field("first_child", first_child);
            }
            ElementKind::Procedure(_) | ElementKind::Condition(_) => {}
        }
        s.finish()
    }
}
