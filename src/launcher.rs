//! Spawning one child process with optional file redirections, then reaping it.

use crate::parser::ParsedCommand;
use crate::status::{classify, ExecutionOutcome, ExitKind};
use log::{debug, warn};
use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

const INPUT_FILE_ERROR: &str = "Input file error";
const OUTPUT_FILE_ERROR: &str = "Output file error";
const COMMAND_NOT_FOUND: &str = "Command not found.";
const FORK_FAILED: &str = "Fork failed";

/// Status recorded when the child side fails before the program runs:
/// unopenable redirection target or unresolvable program name.
const CHILD_FAILURE_CODE: i32 = 1;

/// What became of one launch attempt.
#[derive(Debug)]
pub enum LaunchOutcome {
    /// A wait completed (or the failure was charged to the child); the
    /// outcome feeds the next prompt.
    Completed(ExecutionOutcome),
    /// Process creation itself failed. Nothing was waited on; the previous
    /// prompt state stays in place.
    SpawnFailed,
}

/// Launches `command` and blocks until exactly that child terminates.
///
/// Child-side failures are written to `diag` as fixed one-line messages and
/// surface through the recorded outcome, never as an error of the shell.
pub fn launch(command: &ParsedCommand, diag: &mut dyn Write) -> LaunchOutcome {
    let started = Instant::now();

    // The parser never hands over an empty argv; refuse rather than exec a
    // garbage program name if that ever changes.
    let Some(program) = command.argv.first() else {
        let _ = writeln!(diag, "{}", COMMAND_NOT_FOUND);
        return LaunchOutcome::Completed(child_failure(started));
    };

    let stdin = match redirect_stdin(command.stdin_path.as_deref()) {
        Ok(stdio) => stdio,
        Err(err) => {
            debug!("stdin redirection failed: {}", err);
            let _ = writeln!(diag, "{}", INPUT_FILE_ERROR);
            return LaunchOutcome::Completed(child_failure(started));
        }
    };

    let stdout = match redirect_stdout(command.stdout_path.as_deref()) {
        Ok(stdio) => stdio,
        Err(err) => {
            debug!("stdout redirection failed: {}", err);
            let _ = writeln!(diag, "{}", OUTPUT_FILE_ERROR);
            return LaunchOutcome::Completed(child_failure(started));
        }
    };

    let search_paths = std::env::var_os("PATH").unwrap_or_default();
    let Some(executable) = resolve_program(&search_paths, Path::new(program)) else {
        let _ = writeln!(diag, "{}", COMMAND_NOT_FOUND);
        return LaunchOutcome::Completed(child_failure(started));
    };

    debug!("spawning {:?}", executable);
    let spawned = Command::new(executable.as_os_str())
        .args(&command.argv[1..])
        .stdin(stdin)
        .stdout(stdout)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(err) if exec_failure(&err) => {
            debug!("exec failed for {:?}: {}", executable, err);
            let _ = writeln!(diag, "{}", COMMAND_NOT_FOUND);
            return LaunchOutcome::Completed(child_failure(started));
        }
        Err(err) => {
            warn!("process creation failed: {}", err);
            let _ = writeln!(diag, "{}", FORK_FAILED);
            return LaunchOutcome::SpawnFailed;
        }
    };

    match child.wait() {
        Ok(status) => {
            let outcome = ExecutionOutcome::new(classify(status), started);
            debug!("child finished: {:?}", outcome);
            LaunchOutcome::Completed(outcome)
        }
        Err(err) => {
            // Without a wait result there is nothing to attribute an
            // outcome to.
            warn!("wait failed: {}", err);
            let _ = writeln!(diag, "{}", FORK_FAILED);
            LaunchOutcome::SpawnFailed
        }
    }
}

fn child_failure(started: Instant) -> ExecutionOutcome {
    ExecutionOutcome::new(ExitKind::Exited(CHILD_FAILURE_CODE), started)
}

/// `NotFound` and `PermissionDenied` correspond to an exec-stage failure;
/// any other spawn error means the process could not be created at all.
fn exec_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

fn redirect_stdin(path: Option<&str>) -> io::Result<Stdio> {
    match path {
        Some(path) => Ok(Stdio::from(File::open(path)?)),
        None => Ok(Stdio::inherit()),
    }
}

fn redirect_stdout(path: Option<&str>) -> io::Result<Stdio> {
    match path {
        Some(path) => Ok(Stdio::from(create_output_file(path)?)),
        None => Ok(Stdio::inherit()),
    }
}

/// Create-or-truncate with `rw-r--r--` permissions.
#[cfg(unix)]
fn create_output_file(path: &str) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o644)
        .open(path)
}

#[cfg(not(unix))]
fn create_output_file(path: &str) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Resolves a program name the way `execvp` would.
///
/// Behavior:
/// - Absolute path: returned if it exists.
/// - `./`-prefixed path: returned if it exists in the current directory.
/// - Multiple components (e.g. `bin/sh`): returned if the relative path exists.
/// - Bare name: the first match while walking the `search_paths` directories.
/// - Empty name: not found.
pub fn resolve_program<'a>(search_paths: &OsStr, program: &'a Path) -> Option<Cow<'a, Path>> {
    if program.is_absolute() {
        return existing(program).map(Cow::Borrowed);
    }

    if program.starts_with("./") && program.exists() {
        return Some(Cow::Borrowed(program));
    }

    let mut components = program.components();
    match (components.next(), components.next()) {
        (None, None) => None,
        (Some(name), None) => find_in_search_path(search_paths, name.as_os_str()).map(Cow::Owned),
        _ => existing(program).map(Cow::Borrowed),
    }
}

fn find_in_search_path(search_paths: &OsStr, name: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

fn existing(path: &Path) -> Option<&Path> {
    path.exists().then_some(path)
}
