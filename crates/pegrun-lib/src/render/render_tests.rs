use serde_json::json;

use crate::grammar::{Child, Grammar, RefSpec};
use crate::render::{match_to_json, match_to_xml};

fn arithmetic() -> Grammar {
    let mut g = Grammar::new();
    let ws = g.token(r"\s+").unwrap();
    let number = g.token(r"\d+(\.\d+)?").unwrap();
    g.set_name(number, "NUMBER");
    let op = g.token(r"[+\-*/]").unwrap();
    g.set_name(op, "OP");
    let value = g.group([number]);
    g.set_name(value, "Value");
    let suffix = g.rule([
        Child::from(RefSpec::to(op).name("op")),
        RefSpec::to(value).name("value").into(),
    ]);
    g.set_name(suffix, "Suffix");
    let expr = g.rule([
        Child::from(value),
        RefSpec::to(suffix).many_optional().into(),
    ]);
    g.set_name(expr, "Expr");
    g.set_axiom(expr);
    g.set_skip(ws);
    g.prepare().unwrap();
    g
}

#[test]
fn json_renders_the_expression_tree() {
    let g = arithmetic();
    let result = g.parse_string("10 + 20 / 5").unwrap();
    let value = match_to_json(&g, result.matched().unwrap());

    assert_eq!(
        value,
        json!({
            "name": "Expr",
            "content": [
                {"name": "Value", "content": [{"name": "NUMBER", "value": "10"}]},
                [
                    {"name": "Suffix", "content": [
                        {"name": "OP", "value": "+"},
                        {"name": "Value", "content": [{"name": "NUMBER", "value": "20"}]},
                    ]},
                    {"name": "Suffix", "content": [
                        {"name": "OP", "value": "/"},
                        {"name": "Value", "content": [{"name": "NUMBER", "value": "5"}]},
                    ]},
                ],
            ],
        })
    );
}

#[test]
fn json_renders_multi_group_tokens_as_content() {
    let mut g = Grammar::new();
    let decimal = g.token(r"\d+(\.\d+)?").unwrap();
    g.set_name(decimal, "NUMBER");
    g.set_axiom(decimal);
    g.prepare().unwrap();

    let result = g.parse_string("10.5").unwrap();
    let value = match_to_json(&g, result.matched().unwrap());
    assert_eq!(value, json!({"name": "NUMBER", "content": ["10.5", ".5"]}));
}

#[test]
fn json_renders_missing_optionals_as_null() {
    let mut g = Grammar::new();
    let a = g.token("a").unwrap();
    g.set_name(a, "A");
    let b = g.token("b").unwrap();
    g.set_name(b, "B");
    let axiom = g.rule([Child::from(RefSpec::to(a).optional()), b.into()]);
    g.set_name(axiom, "Doc");
    g.set_axiom(axiom);
    g.prepare().unwrap();

    let result = g.parse_string("b").unwrap();
    let value = match_to_json(&g, result.matched().unwrap());
    assert_eq!(
        value,
        json!({"name": "Doc", "content": [null, {"name": "B", "value": "b"}]})
    );
}

#[test]
fn json_uses_ids_for_unnamed_elements() {
    let mut g = Grammar::new();
    let word = g.word("hi").unwrap();
    g.set_axiom(word);
    g.prepare().unwrap();

    let result = g.parse_string("hi").unwrap();
    let value = match_to_json(&g, result.matched().unwrap());
    assert_eq!(value, json!({"id": 1, "value": "hi"}));
}

#[test]
fn json_omits_procedures_and_conditions() {
    let mut g = Grammar::new();
    let note = g.procedure(|_, _| {});
    let a = g.token("a").unwrap();
    g.set_name(a, "A");
    let axiom = g.rule([note, a]);
    g.set_name(axiom, "Doc");
    g.set_axiom(axiom);
    g.prepare().unwrap();

    let result = g.parse_string("a").unwrap();
    let value = match_to_json(&g, result.matched().unwrap());
    assert_eq!(
        value,
        json!({"name": "Doc", "content": [{"name": "A", "value": "a"}]})
    );
}

#[test]
fn xml_renders_the_expression_tree() {
    let g = arithmetic();
    let result = g.parse_string("10 + 20 / 5").unwrap();
    let xml = match_to_xml(&g, result.matched().unwrap());

    insta::assert_snapshot!(xml, @r#"
    <?xml version="1.0" encoding="UTF-8" standalone="no" ?>
    <Expr><Value><NUMBER t="10"/></Value><Suffix><OP t="+"/><Value><NUMBER t="20"/></Value></Suffix><Suffix><OP t="/"/><Value><NUMBER t="5"/></Value></Suffix></Expr>
    "#);
}

#[test]
fn xml_drops_unnamed_words_and_escapes_text() {
    let mut g = Grammar::new();
    let open = g.word("<").unwrap();
    let text = g.token("[a-z&]+").unwrap();
    g.set_name(text, "text");
    let close = g.word(">").unwrap();
    let axiom = g.rule([open, text, close]);
    g.set_name(axiom, "tag");
    g.set_axiom(axiom);
    g.prepare().unwrap();

    let result = g.parse_string("<a&b>").unwrap();
    let xml = match_to_xml(&g, result.matched().unwrap());
    insta::assert_snapshot!(xml, @r#"
    <?xml version="1.0" encoding="UTF-8" standalone="no" ?>
    <tag><text t="a&amp;b"/></tag>
    "#);
}

#[test]
fn unnamed_token_renders_as_bare_text() {
    let mut g = Grammar::new();
    let text = g.token("[a-z]+").unwrap();
    g.set_axiom(text);
    g.prepare().unwrap();

    let result = g.parse_string("abc").unwrap();
    let xml = match_to_xml(&g, result.matched().unwrap());
    assert!(xml.ends_with("?>\nabc"));
}
