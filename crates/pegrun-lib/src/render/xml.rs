//! XML rendering of match trees.
//!
//! Only named elements produce tags; an unnamed token renders as bare text
//! and other unnamed leaves are dropped. Element names are used as tag
//! names verbatim, so they must be valid XML names.

use std::io;

use crate::grammar::{ElementType, Grammar};
use crate::matches::{Match, Origin};
use crate::render::is_silent;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\" ?>\n";

/// Render a match tree as an XML document.
pub fn match_to_xml(grammar: &Grammar, matched: &Match) -> String {
    let mut out = String::from(XML_HEADER);
    render(grammar, matched, &mut out);
    out
}

/// Write a match tree as an XML document.
pub fn write_xml<W: io::Write>(
    grammar: &Grammar,
    matched: &Match,
    writer: &mut W,
) -> io::Result<()> {
    writer.write_all(match_to_xml(grammar, matched).as_bytes())
}

fn render(grammar: &Grammar, matched: &Match, out: &mut String) {
    match matched.origin() {
        Origin::Reference(reference) => {
            if grammar.reference(reference).cardinality().is_many() {
                render_children(grammar, matched, out);
            } else if let Some(child) = matched.children() {
                render(grammar, child, out);
            }
        }
        Origin::Element(element) => {
            let element = grammar.element(element);
            let name = element.name();
            match element.element_type() {
                ElementType::Word => {
                    if let Some(name) = name {
                        out.push('<');
                        out.push_str(name);
                        out.push_str("/>");
                    }
                }
                ElementType::Token => match (name, matched.token_count()) {
                    (Some(name), 0) => {
                        out.push('<');
                        out.push_str(name);
                        out.push_str("/>");
                    }
                    (Some(name), 1) => {
                        out.push('<');
                        out.push_str(name);
                        out.push_str(" t=\"");
                        escape(matched.token_group(0).unwrap_or_default(), out);
                        out.push_str("\"/>");
                    }
                    (Some(name), count) => {
                        out.push('<');
                        out.push_str(name);
                        out.push('>');
                        for index in 0..count {
                            out.push_str("<g t=\"");
                            escape(matched.token_group(index).unwrap_or_default(), out);
                            out.push_str("\"/>");
                        }
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                    (None, 1) => escape(matched.token_group(0).unwrap_or_default(), out),
                    (None, _) => {}
                },
                ElementType::Group | ElementType::Rule => {
                    if matched.children().is_none() {
                        return;
                    }
                    match name {
                        Some(name) => {
                            out.push('<');
                            out.push_str(name);
                            out.push('>');
                            render_children(grammar, matched, out);
                            out.push_str("</");
                            out.push_str(name);
                            out.push('>');
                        }
                        None => render_children(grammar, matched, out),
                    }
                }
                ElementType::Procedure | ElementType::Condition => {}
            }
        }
    }
}

fn render_children(grammar: &Grammar, matched: &Match, out: &mut String) {
    for child in matched.iter_children() {
        if !is_silent(grammar, child) {
            render(grammar, child, out);
        }
    }
}

fn escape(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
