// main.rs

use std::io::{self, IsTerminal};

use anyhow::{bail, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use envparse::{Directives, Merge};
use log::LevelFilter;

mod logger;
mod repl;
mod util;

static LOGGER: logger::StderrLogger = logger::StderrLogger;

fn cli() -> Command {
    Command::new("envparse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parses ENV style assignment lines and prints them as KEY=\"value\" pairs")
        .arg(
            Arg::new("escape")
                .short('e')
                .long("escape")
                .value_name("CHAR")
                .help("Escape token")
                .default_value("\\"),
        )
        .arg(
            Arg::new("multi")
                .short('m')
                .long("multi")
                .action(ArgAction::SetTrue)
                .help("Keep every value of a repeated key, as written"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::Count)
                .help("Set debug level"),
        )
        .arg(
            Arg::new("line")
                .num_args(1..)
                .help("Lines to parse, stdin is read when none are given"),
        )
}

fn set_logger(p: &ArgMatches) {
    if let Err(err) = log::set_logger(&LOGGER).map(|()| {
        log::set_max_level(match p.get_count("debug") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            2.. => LevelFilter::max(),
        })
    }) {
        eprintln!("{}", err)
    }
}

fn escape_token(p: &ArgMatches) -> Result<char> {
    let raw = p.get_one::<String>("escape").map(String::as_str).unwrap_or_default();
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(token), None) => Ok(token),
        _ => bail!("escape token must be a single character, got {:?}", raw),
    }
}

fn main() -> Result<()> {
    let params = cli().get_matches();
    set_logger(&params);

    let merge = if params.get_flag("multi") { Merge::Append } else { Merge::Replace };
    let mut session = repl::Session::new(Directives::new(escape_token(&params)?), merge);

    match params.get_many::<String>("line") {
        Some(lines) => {
            for line in lines {
                session.feed(line)?;
            }
        }
        None if io::stdin().is_terminal() => repl::start_repl(&mut session)?,
        None => repl::run_reader(&mut session, io::stdin().lock())?,
    }

    if session.rejected() > 0 {
        std::process::exit(1);
    }
    Ok(())
}
