//! The `parse` command: run the built-in arithmetic grammar over input and
//! report `Successful|Partial|Failed` plus consumed/remaining byte counts.

use pegrun_lib::render;
use pegrun_lib::{
    Child, Cursor, Grammar, ParseLimits, ParseStatus, PrintTracer, RefSpec, Verbosity,
};

use crate::cli::ParseParams;

pub fn run(params: ParseParams) -> i32 {
    let grammar = arithmetic();

    let inline;
    let cursor = match (&params.input, &params.source) {
        (Some(path), _) => match Cursor::open(path) {
            Ok(cursor) => cursor,
            Err(error) => {
                eprintln!("error: cannot open {}: {error}", path.display());
                return 2;
            }
        },
        (None, Some(text)) => {
            inline = text.clone();
            Cursor::from_string(&inline)
        }
        (None, None) => {
            eprintln!("error: provide an input file or --source");
            return 2;
        }
    };

    let result = if params.verbose {
        let mut tracer = PrintTracer::new(Verbosity::Full);
        grammar.parse_cursor_with(cursor, ParseLimits::default(), &mut tracer)
    } else {
        grammar.parse_cursor(cursor)
    };
    let result = match result {
        Ok(result) => result,
        Err(error) => {
            eprintln!("error: {error}");
            return 2;
        }
    };

    let status = match result.status() {
        ParseStatus::Success => "Successful",
        ParseStatus::Partial => "Partial",
        ParseStatus::Failure => "Failed",
    };
    println!(
        "{status}: parsed {}, remaining {}",
        result.parsed(),
        result.remaining()
    );

    if let Some(matched) = result.matched() {
        if params.json {
            println!("{}", render::match_to_json(&grammar, matched));
        }
        if params.xml {
            println!("{}", render::match_to_xml(&grammar, matched));
        }
    } else if let Some(last) = result.last_match() {
        eprintln!(
            "furthest match: offset {}..{} (symbol {})",
            last.offset,
            last.end_offset(),
            last.symbol
        );
    }

    if params.stats {
        if let Ok(stats) = serde_json::to_string(result.context().stats()) {
            eprintln!("{stats}");
        }
    }

    if result.is_failure() { 1 } else { 0 }
}

/// The demo grammar: `Expr = Value (OP Value)*`, whitespace skipped.
fn arithmetic() -> Grammar {
    let mut g = Grammar::new();
    let ws = g.token(r"\s+").expect("whitespace pattern compiles");
    let number = g.token(r"\d+(\.\d+)?").expect("number pattern compiles");
    g.set_name(number, "NUMBER");
    let var = g.token(r"\w+").expect("identifier pattern compiles");
    g.set_name(var, "VAR");
    let op = g.token(r"[+\-*/]").expect("operator pattern compiles");
    g.set_name(op, "OP");
    let value = g.group([number, var]);
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
    g.prepare().expect("demo grammar prepares");
    g
}

#[cfg(test)]
mod tests {
    use super::arithmetic;

    #[test]
    fn demo_grammar_parses_expressions() {
        let grammar = arithmetic();
        let result = grammar.parse_string("10 + 20 / 5").unwrap();
        assert!(result.is_success());
        assert_eq!(result.remaining(), 0);
    }

    #[test]
    fn demo_grammar_reports_partial_input() {
        let grammar = arithmetic();
        let result = grammar.parse_string("10 + ").unwrap();
        assert!(result.is_partial());
    }
}
