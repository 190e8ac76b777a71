//! # choc
//!
//! An interactive CLI for ranked queries over a chocolate bar review
//! dataset.
//!
//! ## Overview
//!
//! choc wraps choclib: it loads the bars CSV and countries JSON once at
//! startup, then answers short commands like `companies cocoa top=5`
//! either from an interactive prompt or as a one-shot invocation.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive prompt
//! choc --bars flavors_of_cacao_cleaned.csv --countries countries.json
//!
//! # One-shot query
//! choc bars sellcountry=CA top=3
//!
//! # Raw rows as JSON instead of the fixed-width table
//! choc --output json companies cocoa top=5
//! ```
//!
//! Inside the prompt, `help` shows the command vocabulary and `exit`
//! leaves. A command that fails at the data layer (for example a raw
//! filter naming a column that does not exist) prints a "no results"
//! line; it never ends the session.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use console::Style;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use choclib::{execute, parse_command, render_rows, QueryPlan, Store};

/// Static help text, bundled at compile time
const HELP_TEXT: &str = include_str!("../help.txt");

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("choc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Ranked queries over a chocolate bar review dataset")
        .arg(
            Arg::new("bars")
                .short('b')
                .long("bars")
                .default_value("flavors_of_cacao_cleaned.csv")
                .help("Path to the bars CSV file"),
        )
        .arg(
            Arg::new("countries")
                .short('c')
                .long("countries")
                .default_value("countries.json")
                .help("Path to the countries JSON file"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json"])
                .default_value("table")
                .help("Output format for query results"),
        )
        .arg(
            Arg::new("command")
                .num_args(0..)
                .trailing_var_arg(true)
                .help("Run a single command and exit instead of prompting"),
        )
}

/// Process one command line against the store and print the result.
///
/// Data-layer failures (unknown raw filter column) are absorbed here: the
/// command prints a "no results" line and the session continues.
fn run_query(store: &Store, line: &str, json: bool) -> anyhow::Result<()> {
    let request = parse_command(line);
    let plan = match QueryPlan::from_request(&request) {
        Some(plan) => plan,
        None => {
            print_no_results();
            return Ok(());
        }
    };

    let rows = match execute(store, &plan) {
        Ok(rows) => rows,
        Err(_) => {
            print_no_results();
            return Ok(());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        print_no_results();
    } else {
        for rendered in render_rows(&plan, &rows) {
            println!("{}", rendered);
        }
    }
    Ok(())
}

fn print_no_results() {
    let dim = Style::new().dim();
    println!("{}", dim.apply_to("no results for this command"));
}

/// The interactive loop: prompt, dispatch, repeat until `exit` or EOF.
fn interactive_prompt(store: &Store, json: bool) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline("Enter a command: ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;
                match line {
                    "exit" => break,
                    "help" => print!("{}", HELP_TEXT),
                    _ => run_query(store, line, json)?,
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let bars_path = matches
        .get_one::<String>("bars")
        .map(|s| s.as_str())
        .unwrap_or("flavors_of_cacao_cleaned.csv");
    let countries_path = matches
        .get_one::<String>("countries")
        .map(|s| s.as_str())
        .unwrap_or("countries.json");
    let json = matches
        .get_one::<String>("output")
        .map(|s| s == "json")
        .unwrap_or(false);

    let store = choclib::load_store(bars_path, countries_path)
        .with_context(|| format!("loading dataset from '{}' and '{}'", bars_path, countries_path))?;

    let words: Vec<String> = matches
        .get_many::<String>("command")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    if words.is_empty() {
        interactive_prompt(&store, json)
    } else {
        run_query(&store, &words.join(" "), json)
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
