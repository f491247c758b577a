//! The surrounding read loop: prompt, line reading, and the `cd` builtin.

use crate::executor::{self, ExitCode};
use crate::parser;
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, IsTerminal};

/// Prompt shown when standard input is attached to a terminal.
pub const PROMPT: &str = "$CS450 ";

/// Parse one raw line of input and execute it to completion.
///
/// Returns once every effect of the line's command tree is observably
/// complete. Does not handle builtins; see [`dispatch`].
pub fn run_line(line: &str) -> Result<ExitCode> {
    let cmd = parser::parse(line)?;
    log::debug!("parsed: {cmd:?}");
    executor::execute(cmd)
}

/// Handle one line of input, builtins included.
///
/// Diagnostics go to stderr and the session continues regardless of the
/// outcome; the returned code is non-zero on parse errors and on `cd`
/// failures.
pub fn dispatch(line: &str) -> ExitCode {
    let line = line.strip_suffix('\n').unwrap_or(line);

    // `cd` must run in the shell's own process: a working-directory change
    // inside a spawned child would be invisible here. Recognized before the
    // parser ever sees the line.
    if let Some(target) = line.strip_prefix("cd ") {
        return match std::env::set_current_dir(target) {
            Ok(()) => 0,
            Err(_) => {
                eprintln!("cannot cd {target}");
                1
            }
        };
    }

    match run_line(line) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("minish: {err}");
            2
        }
    }
}

/// Interactive loop with history, used when stdin is a terminal.
fn run_interactive() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                dispatch(&line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("minish: readline: {err}");
                break;
            }
        }
    }

    Ok(())
}

/// Plain line loop for piped input; the prompt is suppressed.
fn run_piped() -> std::io::Result<()> {
    for line in std::io::stdin().lock().lines() {
        dispatch(&line?);
    }
    Ok(())
}

/// Read and run input lines until end of input.
pub fn run() -> Result<()> {
    if std::io::stdin().is_terminal() {
        run_interactive()?;
    } else {
        run_piped()?;
    }
    Ok(())
}
