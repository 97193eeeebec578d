//! Shunt
//!
//! An interactive arithmetic expression evaluator.

mod frontend;
mod middle;
mod backend;
mod utils;
mod stdlib;
mod feedback;
mod session;

use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process;

use feedback::ErrorReport;
use session::{Config, Reply, Session};

/// Shunt expression evaluator
#[derive(Parser, Debug)]
#[command(name = "shunt")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Shunt - an interactive arithmetic expression evaluator")]
struct Cli {
    /// Evaluate an expression and exit (repeatable)
    #[arg(short, long = "eval", value_name = "EXPR")]
    eval: Vec<String>,

    /// Start with the debug dumps enabled
    #[arg(long)]
    debug: bool,

    /// Report errors as JSON diagnostics
    #[arg(long)]
    json: bool,

    /// Prompt shown in interactive mode
    #[arg(long, default_value = "> ")]
    prompt: String,
}

/// Result of handing one line to the session
enum Step {
    Continue,
    Failed,
    Exit(i32),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut session = Session::new(Config { debug: cli.debug });
    let mut out = io::stdout();

    if !cli.eval.is_empty() {
        let mut failed = false;
        for expr in &cli.eval {
            match step(&mut session, expr, cli.json, &mut out)? {
                Step::Continue => {}
                Step::Failed => failed = true,
                Step::Exit(code) => process::exit(code),
            }
        }
        if failed {
            process::exit(1);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let prompt = stdin.is_terminal().then_some(cli.prompt.as_str());
    if let Some(code) = repl(&mut session, stdin.lock(), &mut out, prompt, cli.json)? {
        process::exit(code);
    }
    Ok(())
}

/// Evaluate lines from `input` until EOF or `exit`, returning the exit code
/// if `exit` ran
fn repl(
    session: &mut Session,
    mut input: impl BufRead,
    out: &mut impl Write,
    prompt: Option<&str>,
    json: bool,
) -> anyhow::Result<Option<i32>> {
    let mut buf = Vec::new();

    loop {
        if let Some(prompt) = prompt {
            write!(out, "{prompt}")?;
            out.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            log::debug!("end of input");
            return Ok(None);
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            eprintln!("error: input line is not valid UTF-8");
            continue;
        };
        let text = line.trim_end_matches(['\n', '\r']);
        if text.trim().is_empty() {
            continue;
        }

        if let Step::Exit(code) = step(session, text, json, out)? {
            return Ok(Some(code));
        }
    }
}

/// Evaluate a single line and print its result or error
fn step(
    session: &mut Session,
    line: &str,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<Step> {
    match session.evaluate(line) {
        Ok(Reply::Output { text, notes }) => {
            for note in &notes {
                writeln!(out, "{}", note.trim_end())?;
            }
            writeln!(out, "{text}")?;
            Ok(Step::Continue)
        }
        Ok(Reply::Exit(code)) => {
            log::debug!("exit requested with code {code}");
            Ok(Step::Exit(code))
        }
        Err(e) => {
            if json {
                eprintln!("{}", ErrorReport::from_error(&e, line).to_json());
            } else {
                eprintln!("error: {e}");
            }
            Ok(Step::Failed)
        }
    }
}
