//! JSON rendering of match trees.

use std::io;

use serde_json::{Map, Value, json};

use crate::grammar::{Element, ElementType, Grammar};
use crate::matches::{Match, Origin};
use crate::render::is_silent;

/// Render a match tree as a JSON value.
pub fn match_to_json(grammar: &Grammar, matched: &Match) -> Value {
    render(grammar, matched)
}

/// Write a match tree as compact JSON.
pub fn write_json<W: io::Write>(
    grammar: &Grammar,
    matched: &Match,
    writer: &mut W,
) -> io::Result<()> {
    serde_json::to_writer(writer, &render(grammar, matched)).map_err(io::Error::from)
}

fn render(grammar: &Grammar, matched: &Match) -> Value {
    match matched.origin() {
        Origin::Reference(reference) => {
            if grammar.reference(reference).cardinality().is_many() {
                Value::Array(rendered_children(grammar, matched))
            } else {
                match matched.children() {
                    Some(child) => render(grammar, child),
                    None => Value::Null,
                }
            }
        }
        Origin::Element(element) => {
            let element = grammar.element(element);
            match element.element_type() {
                ElementType::Word => {
                    let mut object = head(element);
                    object.insert(
                        "value".to_string(),
                        json!(element.word_text().unwrap_or_default()),
                    );
                    Value::Object(object)
                }
                ElementType::Token => {
                    let mut object = head(element);
                    match matched.token_count() {
                        0 => {}
                        1 => {
                            object.insert(
                                "value".to_string(),
                                json!(matched.token_group(0).unwrap_or_default()),
                            );
                        }
                        count => {
                            let groups: Vec<Value> = (0..count)
                                .map(|index| json!(matched.token_group(index).unwrap_or_default()))
                                .collect();
                            object.insert("content".to_string(), Value::Array(groups));
                        }
                    }
                    Value::Object(object)
                }
                ElementType::Group | ElementType::Rule => {
                    let mut object = head(element);
                    if matched.children().is_some() {
                        object.insert(
                            "content".to_string(),
                            Value::Array(rendered_children(grammar, matched)),
                        );
                    }
                    Value::Object(object)
                }
                ElementType::Procedure | ElementType::Condition => Value::Null,
            }
        }
    }
}

fn rendered_children(grammar: &Grammar, matched: &Match) -> Vec<Value> {
    matched
        .iter_children()
        .filter(|child| !is_silent(grammar, child))
        .map(|child| render(grammar, child))
        .collect()
}

fn head(element: &Element) -> Map<String, Value> {
    let mut object = Map::new();
    match element.name() {
        Some(name) => {
            object.insert("name".to_string(), json!(name));
        }
        None => {
            object.insert(
                "id".to_string(),
                json!(element.id().map_or(-1, |id| id as i64)),
            );
        }
    }
    object
}
