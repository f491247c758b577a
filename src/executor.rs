//! Walks a command tree, spawning processes and applying composition semantics.
//!
//! Every invocation of [`execute`] returns only once the whole subtree's
//! effects are observably complete: simple commands are waited for, a
//! sequential right side starts strictly after the left side (nested children
//! included) has finished, and a parallel node joins both sides before
//! returning. Program invocations are real OS processes; subtree concurrency
//! is a dedicated thread per parallel left branch.

use crate::parser::Cmd;
use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};
use std::thread;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Exit code reported when a named program cannot be located or invoked.
const EXEC_FAILURE: ExitCode = 127;

/// Execute a command tree to completion, consuming it.
///
/// Exit statuses of waited-for children are collected and logged but never
/// drive control flow: a failing left side does not stop the right side of
/// either composition. The returned code is that of the last locally
/// completed branch, surfaced for observability only.
pub fn execute(cmd: Cmd) -> Result<ExitCode> {
    match cmd {
        Cmd::Exec { argv } => run_program(argv),

        Cmd::Seq { left, right } => {
            let status = execute(*left)?;
            log::debug!("seq: left finished with status {status}");
            execute(*right)
        }

        Cmd::Par { left, right } => {
            let worker = thread::spawn(move || execute(*left));
            // Run the right side locally, then observe the left side's
            // completion via join; the composite is done only when both are.
            let right_status = execute(*right);
            let left_status = worker
                .join()
                .map_err(|_| anyhow::anyhow!("parallel branch panicked"))??;
            let status = right_status?;
            log::debug!("par: left finished with status {left_status}, right with {status}");
            Ok(status)
        }
    }
}

/// Spawn one child process for a simple command and wait for it.
///
/// An empty `argv` is a no-op that succeeds without spawning. A program that
/// cannot be spawned gets a diagnostic on stderr and [`EXEC_FAILURE`]; the
/// shell itself carries on.
fn run_program(argv: Vec<String>) -> Result<ExitCode> {
    let Some((program, args)) = argv.split_first() else {
        return Ok(0);
    };

    let mut child = match Command::new(program).args(args).spawn() {
        Ok(child) => child,
        Err(err) => {
            eprintln!("minish: {program}: {err}");
            return Ok(EXEC_FAILURE);
        }
    };

    let exit_status = child
        .wait()
        .with_context(|| format!("waiting for {program}"))?;
    log::debug!("{program}: {exit_status}");

    match exit_status.code() {
        Some(code) => Ok(code),
        None => Ok(terminated_by_signal(exit_status)),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use std::fs;
    use tempfile::TempDir;

    /// Write an executable `/bin/sh` script into `dir` and return its path.
    /// Paths from `TempDir` contain no whitespace, so they survive the
    /// shell's whitespace-only word splitting.
    #[cfg(unix)]
    fn script(dir: &TempDir, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perm = fs::metadata(&path).unwrap().permissions();
        perm.set_mode(0o755);
        fs::set_permissions(&path, perm).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn markers(dir: &TempDir) -> Vec<String> {
        let log = dir.path().join("markers");
        fs::read_to_string(log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn empty_command_is_a_noop() {
        let code = execute(Cmd::Exec { argv: Vec::new() }).unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_program_reports_failure_without_crashing() {
        let code = execute(Cmd::Exec {
            argv: vec!["definitely-not-a-real-program-a1b2c3".to_string()],
        })
        .unwrap();
        assert_eq!(code, EXEC_FAILURE);
    }

    #[test]
    #[cfg(unix)]
    fn child_exit_status_is_collected() {
        let code = execute(Cmd::Exec {
            argv: vec!["sh".into(), "-c".into(), "exit 3".into()],
        })
        .unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    #[cfg(unix)]
    fn sequential_waits_before_starting_right() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("markers").to_string_lossy().into_owned();
        let slow = script(&dir, "slow", &format!("sleep 0.4\necho slow >> {log}"));
        let fast = script(&dir, "fast", &format!("echo fast >> {log}"));

        let cmd = parse(&format!("{slow} ; {fast}")).unwrap();
        execute(cmd).unwrap();

        assert_eq!(markers(&dir), vec!["slow", "fast"]);
    }

    #[test]
    #[cfg(unix)]
    fn parallel_runs_both_sides_concurrently() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("markers").to_string_lossy().into_owned();
        let slow = script(&dir, "slow", &format!("sleep 0.4\necho slow >> {log}"));
        let fast = script(&dir, "fast", &format!("echo fast >> {log}"));

        let cmd = parse(&format!("{slow} & {fast}")).unwrap();
        execute(cmd).unwrap();

        // The fast side finished first, yet the composite waited for both.
        assert_eq!(markers(&dir), vec!["fast", "slow"]);
    }

    #[test]
    #[cfg(unix)]
    fn parallel_chain_overlaps_at_every_level() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("markers").to_string_lossy().into_owned();
        let a = script(&dir, "a", &format!("sleep 0.6\necho a >> {log}"));
        let b = script(&dir, "b", &format!("sleep 0.3\necho b >> {log}"));
        let c = script(&dir, "c", &format!("echo c >> {log}"));

        // a & (b & c): all three overlap; completion waits for all three.
        let cmd = parse(&format!("{a} & {b} & {c}")).unwrap();
        execute(cmd).unwrap();

        assert_eq!(markers(&dir), vec!["c", "b", "a"]);
    }

    #[test]
    #[cfg(unix)]
    fn sequence_after_parallel_waits_for_both_sides() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("markers").to_string_lossy().into_owned();
        let slow = script(&dir, "slow", &format!("sleep 0.4\necho slow >> {log}"));
        let fast = script(&dir, "fast", &format!("echo fast >> {log}"));
        let last = script(&dir, "last", &format!("echo last >> {log}"));

        // `slow & (fast ; last)`: right-associative, so `last` follows `fast`
        // but is not ordered against `slow`. Composite completion still
        // requires all three.
        let cmd = parse(&format!("{slow} & {fast} ; {last}")).unwrap();
        execute(cmd).unwrap();

        let seen = markers(&dir);
        assert_eq!(seen.len(), 3);
        let pos = |m: &str| seen.iter().position(|x| x == m).unwrap();
        assert!(pos("fast") < pos("last"));
    }

    #[test]
    #[cfg(unix)]
    fn failing_left_does_not_stop_the_sequence() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("markers").to_string_lossy().into_owned();
        let fast = script(&dir, "fast", &format!("echo fast >> {log}"));

        let cmd = parse(&format!("no-such-program-xyz ; {fast}")).unwrap();
        let code = execute(cmd).unwrap();

        assert_eq!(markers(&dir), vec!["fast"]);
        assert_eq!(code, 0);
    }
}
