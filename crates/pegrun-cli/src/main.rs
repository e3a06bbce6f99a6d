mod cli;
mod commands;

use cli::{ParseParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("parse", m)) => {
            let params = ParseParams::from_matches(m);
            std::process::exit(commands::parse::run(params));
        }
        _ => unreachable!("clap should have caught this"),
    }
}
