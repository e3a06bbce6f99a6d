use crate::engine::variables::{Value, Variables};

#[test]
fn fresh_stack_has_the_root_sentinel() {
    let variables = Variables::new();
    assert_eq!(variables.depth(), 0);
    assert_eq!(variables.count(), 1);
    assert_eq!(variables.get_int("depth"), Some(0));
}

#[test]
fn set_and_get() {
    let mut variables = Variables::new();
    variables.set("count", 3);
    assert_eq!(variables.get_int("count"), Some(3));
    variables.set("name", "axiom");
    assert_eq!(
        variables.get("name").and_then(Value::as_text),
        Some("axiom")
    );
    assert_eq!(variables.get("missing"), None);
}

#[test]
fn set_updates_in_place_at_the_same_depth() {
    let mut variables = Variables::new();
    variables.set("count", 1);
    let frames = variables.count();
    variables.set("count", 2);
    assert_eq!(variables.count(), frames);
    assert_eq!(variables.get_int("count"), Some(2));
}

#[test]
fn push_shadows_and_pop_restores() {
    let mut variables = Variables::new();
    variables.set("count", 1);
    variables.push();
    assert_eq!(variables.depth(), 1);
    assert_eq!(variables.get_int("depth"), Some(1));

    // a set at the deeper scope shadows without touching the outer binding
    variables.set("count", 10);
    assert_eq!(variables.get_int("count"), Some(10));

    variables.pop();
    assert_eq!(variables.depth(), 0);
    assert_eq!(variables.get_int("count"), Some(1));
    assert_eq!(variables.get_int("depth"), Some(0));
}

#[test]
fn pop_discards_everything_set_in_the_scope() {
    let mut variables = Variables::new();
    variables.push();
    variables.set("a", 1);
    variables.set("b", 2);
    variables.pop();
    assert_eq!(variables.get("a"), None);
    assert_eq!(variables.get("b"), None);
    assert_eq!(variables.count(), 1);
}

#[test]
fn nested_scopes_unwind_in_order() {
    let mut variables = Variables::new();
    variables.push();
    variables.set("x", 1);
    variables.push();
    variables.set("x", 2);
    assert_eq!(variables.get_int("x"), Some(2));
    variables.pop();
    assert_eq!(variables.get_int("x"), Some(1));
    variables.pop();
    assert_eq!(variables.get_int("x"), None);
}

#[test]
fn values_convert_from_primitives() {
    assert_eq!(Value::from(7).as_int(), Some(7));
    assert_eq!(Value::from("text").as_text(), Some("text"));
    assert_eq!(Value::from(String::from("owned")).as_text(), Some("owned"));
    assert_eq!(Value::from(7).as_text(), None);
    assert_eq!(Value::from("text").as_int(), None);
}
