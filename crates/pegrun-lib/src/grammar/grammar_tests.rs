use std::collections::HashSet;

use crate::error::GrammarError;
use crate::grammar::{Cardinality, Child, ElementType, Grammar, RefSpec, Symbol};

#[test]
fn empty_word_is_rejected() {
    let mut g = Grammar::new();
    assert!(matches!(g.word(""), Err(GrammarError::EmptyWord)));
}

#[test]
fn invalid_pattern_is_rejected() {
    let mut g = Grammar::new();
    assert!(matches!(
        g.token("([a-z"),
        Err(GrammarError::Pattern { .. })
    ));
}

#[test]
fn prepare_requires_an_axiom() {
    let mut g = Grammar::new();
    assert!(matches!(g.prepare(), Err(GrammarError::MissingAxiom)));
}

#[test]
fn predicate_under_many_is_rejected() {
    let mut g = Grammar::new();
    let procedure = g.procedure(|_, _| {});
    let axiom = g.rule([RefSpec::to(procedure).many()]);
    g.set_axiom(axiom);
    assert!(matches!(
        g.prepare(),
        Err(GrammarError::PredicateCardinality('+'))
    ));
}

#[test]
fn prepare_assigns_dense_unique_ids() {
    let mut g = Grammar::new();
    let ws = g.token(r"\s+").unwrap();
    let a = g.word("a").unwrap();
    let b = g.word("b").unwrap();
    let axiom = g.rule([a, b]);
    g.set_axiom(axiom);
    g.set_skip(ws);
    g.prepare().unwrap();

    // skip root is 0, axiom subtree starts at 1
    assert_eq!(g.element_symbol(ws), Some(0));
    assert_eq!(g.element_symbol(axiom), Some(1));

    let mut seen = HashSet::new();
    for id in 0..g.symbols_count() as u32 {
        let symbol = g.symbol(id).expect("dense table has no holes");
        // no two ids resolve to the same node
        assert!(seen.insert(symbol));
        // table maps back to the node carrying that id
        match symbol {
            Symbol::Element(element) => assert_eq!(g.element_symbol(element), Some(id)),
            Symbol::Reference(reference) => assert_eq!(g.reference_symbol(reference), Some(id)),
        }
    }
    // rule + 2 refs + 2 words + skip token
    assert_eq!(g.symbols_count(), 6);
}

#[test]
fn shared_elements_get_one_id() {
    let mut g = Grammar::new();
    let word = g.word("x").unwrap();
    let axiom = g.rule([word, word]);
    g.set_axiom(axiom);
    g.prepare().unwrap();

    // rule(1), two refs, one shared word; slot 0 stays empty without a skip
    assert_eq!(g.symbols_count(), 5);
    assert!(g.symbol(0).is_none());
    assert_eq!(g.element_symbol(axiom), Some(1));
}

#[test]
fn recursive_grammars_prepare_without_looping() {
    let mut g = Grammar::new();
    let number = g.token(r"\d+").unwrap();
    let expr = g.rule([number]);
    let nested = g.rule([expr]);
    g.add_child(expr, RefSpec::to(nested).optional());
    g.set_axiom(expr);
    g.prepare().unwrap();

    assert!(g.element_symbol(expr).is_some());
    assert!(g.element_symbol(nested).is_some());
}

#[test]
fn mutation_unprepares_the_grammar() {
    let mut g = Grammar::new();
    let a = g.word("a").unwrap();
    let axiom = g.rule([a]);
    g.set_axiom(axiom);
    g.prepare().unwrap();
    assert!(g.is_prepared());

    let b = g.word("b").unwrap();
    assert!(!g.is_prepared());
    g.add_child(axiom, b);
    g.prepare().unwrap();
    assert!(g.is_prepared());
    assert!(matches!(
        g.parse_string("a"),
        Ok(result) if result.is_failure()
    ));
}

#[test]
fn unprepared_parse_is_an_error() {
    let mut g = Grammar::new();
    let a = g.word("a").unwrap();
    g.set_axiom(a);
    assert!(matches!(
        g.parse_string("a"),
        Err(crate::error::ParseError::Grammar(GrammarError::NotPrepared))
    ));
}

#[test]
fn named_children_keep_their_names() {
    let mut g = Grammar::new();
    let a = g.word("a").unwrap();
    let axiom = g.rule([RefSpec::to(a).name("first").optional()]);
    g.set_axiom(axiom);
    g.prepare().unwrap();

    let first = g.element(axiom).first_child().unwrap();
    let reference = g.reference(first);
    assert_eq!(reference.name(), Some("first"));
    assert_eq!(reference.cardinality(), Cardinality::Optional);
    assert_eq!(reference.element(), a);
    assert!(reference.next().is_none());
}

#[test]
fn element_accessors() {
    let mut g = Grammar::new();
    let word = g.word("if").unwrap();
    let token = g.token(r"\d+").unwrap();
    g.set_name(word, "IF");

    assert_eq!(g.element(word).element_type(), ElementType::Word);
    assert_eq!(g.element(word).word_text(), Some("if"));
    assert_eq!(g.element(word).name(), Some("IF"));
    assert_eq!(g.element(token).element_type(), ElementType::Token);
    assert_eq!(g.element(token).token_pattern(), Some(r"\d+"));
    assert_eq!(g.element(token).word_text(), None);
}

#[test]
fn walk_visits_each_reachable_node_once() {
    let mut g = Grammar::new();
    let word = g.word("x").unwrap();
    let inner = g.rule([word, word]);
    let axiom = g.rule([Child::from(inner), word.into()]);
    g.set_axiom(axiom);

    let mut elements = 0;
    let mut references = 0;
    g.walk(axiom, &mut |symbol| match symbol {
        Symbol::Element(_) => elements += 1,
        Symbol::Reference(_) => references += 1,
    });
    // axiom, inner, word (shared, visited once)
    assert_eq!(elements, 3);
    assert_eq!(references, 4);
}

#[test]
fn walk_handles_recursive_grammars() {
    let mut g = Grammar::new();
    let cycle = g.rule::<[Child; 0]>([]);
    g.add_child(cycle, cycle);
    g.set_axiom(cycle);

    let mut visited = 0;
    g.walk(cycle, &mut |_| visited += 1);
    assert_eq!(visited, 2);
}

#[test]
fn cleared_composites_can_be_rebuilt() {
    let mut g = Grammar::new();
    let a = g.word("a").unwrap();
    let b = g.word("b").unwrap();
    let axiom = g.rule([a, a]);
    g.set_axiom(axiom);
    g.prepare().unwrap();

    g.clear_children(axiom);
    assert!(g.element(axiom).first_child().is_none());
    g.add_child(axiom, a);
    g.add_child(axiom, b);
    g.prepare().unwrap();

    assert!(g.parse_string("ab").unwrap().is_success());
    assert!(g.parse_string("aa").unwrap().is_failure());
}

#[test]
fn cardinality_characters_round_trip() {
    for cardinality in [
        Cardinality::One,
        Cardinality::Optional,
        Cardinality::Many,
        Cardinality::ManyOptional,
    ] {
        assert_eq!(
            Cardinality::from_char(cardinality.as_char()),
            Some(cardinality)
        );
    }
    assert_eq!(Cardinality::from_char('x'), None);
}
