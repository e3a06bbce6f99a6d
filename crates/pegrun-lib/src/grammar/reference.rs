//! References: the cardinality-bearing wrappers through which elements
//! appear as children of composites.
//!
//! A reference is a distinct node, never an element. Composite children are
//! always references; a bare element passed as a child is auto-wrapped in a
//! `1` reference.

use crate::grammar::element::{ElementId, SymbolId};

/// Repetition semantics of a reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Cardinality {
    /// Exactly one match.
    One,
    /// Zero or one; a missing match is a zero-length success.
    Optional,
    /// One or more, greedy.
    Many,
    /// Zero or more, greedy; empty succeeds with zero length.
    ManyOptional,
}

impl Cardinality {
    /// One-character code: `1`, `?`, `+`, `*`.
    pub fn as_char(self) -> char {
        match self {
            Cardinality::One => '1',
            Cardinality::Optional => '?',
            Cardinality::Many => '+',
            Cardinality::ManyOptional => '*',
        }
    }

    pub fn from_char(c: char) -> Option<Cardinality> {
        match c {
            '1' => Some(Cardinality::One),
            '?' => Some(Cardinality::Optional),
            '+' => Some(Cardinality::Many),
            '*' => Some(Cardinality::ManyOptional),
            _ => None,
        }
    }

    /// `+` and `*` loop over their element.
    pub fn is_many(self) -> bool {
        matches!(self, Cardinality::Many | Cardinality::ManyOptional)
    }

    /// `?` and `*` succeed on zero matches.
    pub fn allows_empty(self) -> bool {
        matches!(self, Cardinality::Optional | Cardinality::ManyOptional)
    }
}

/// Handle of a reference in the grammar arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RefId(pub(crate) u32);

impl RefId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A reference node: target element, cardinality, optional name, and the
/// link to the next sibling inside its composite.
#[derive(Debug)]
pub struct Reference {
    pub(crate) id: Option<SymbolId>,
    pub(crate) name: Option<String>,
    pub(crate) cardinality: Cardinality,
    pub(crate) element: ElementId,
    pub(crate) next: Option<RefId>,
}

impl Reference {
    /// Symbol id, assigned by `prepare`.
    pub fn id(&self) -> Option<SymbolId> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// The wrapped element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Next sibling in the owning composite.
    pub fn next(&self) -> Option<RefId> {
        self.next
    }
}

/// Builder value describing a reference before it is interned into the
/// grammar as a composite child.
#[derive(Clone, Debug)]
pub struct RefSpec {
    pub(crate) element: ElementId,
    pub(crate) cardinality: Cardinality,
    pub(crate) name: Option<String>,
}

impl RefSpec {
    /// Reference `element` with cardinality `1` and no name.
    pub fn to(element: ElementId) -> RefSpec {
        RefSpec {
            element,
            cardinality: Cardinality::One,
            name: None,
        }
    }

    pub fn cardinality(mut self, cardinality: Cardinality) -> RefSpec {
        self.cardinality = cardinality;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> RefSpec {
        self.name = Some(name.into());
        self
    }

    pub fn one(self) -> RefSpec {
        self.cardinality(Cardinality::One)
    }

    pub fn optional(self) -> RefSpec {
        self.cardinality(Cardinality::Optional)
    }

    pub fn many(self) -> RefSpec {
        self.cardinality(Cardinality::Many)
    }

    pub fn many_optional(self) -> RefSpec {
        self.cardinality(Cardinality::ManyOptional)
    }
}

/// A child passed to a composite builder: a bare element (wrapped in a `1`
/// reference) or an explicit reference spec.
#[derive(Clone, Debug)]
pub enum Child {
    Element(ElementId),
    Ref(RefSpec),
}

impl From<ElementId> for Child {
    fn from(element: ElementId) -> Child {
        Child::Element(element)
    }
}

impl From<RefSpec> for Child {
    fn from(spec: RefSpec) -> Child {
        Child::Ref(spec)
    }
}
