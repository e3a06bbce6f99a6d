//! Command-line definition for the `pegrun` binary.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

pub fn build_cli() -> Command {
    Command::new("pegrun")
        .about("Runtime PEG engine demo")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(parse_command())
}

fn parse_command() -> Command {
    Command::new("parse")
        .about("Parse input with the built-in arithmetic grammar")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Input file to parse"),
        )
        .arg(
            Arg::new("source")
                .short('s')
                .long("source")
                .value_name("TEXT")
                .help("Inline source text"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the match tree as JSON"),
        )
        .arg(
            Arg::new("xml")
                .long("xml")
                .action(ArgAction::SetTrue)
                .help("Print the match tree as XML"),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .action(ArgAction::SetTrue)
                .help("Print parse statistics as JSON on stderr"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Trace the recognition walk on stderr"),
        )
}

pub struct ParseParams {
    pub input: Option<PathBuf>,
    pub source: Option<String>,
    pub json: bool,
    pub xml: bool,
    pub stats: bool,
    pub verbose: bool,
}

impl ParseParams {
    pub fn from_matches(matches: &ArgMatches) -> ParseParams {
        ParseParams {
            input: matches.get_one::<PathBuf>("input").cloned(),
            source: matches.get_one::<String>("source").cloned(),
            json: matches.get_flag("json"),
            xml: matches.get_flag("xml"),
            stats: matches.get_flag("stats"),
            verbose: matches.get_flag("verbose"),
        }
    }
}
