// src/exec/supervisor.rs

use std::io::{ErrorKind, Read, pipe};
use std::process::{Command, Stdio};

use tracing::{debug, trace, warn};

use crate::exec::splitter::LineSplitter;
use crate::job::{JobConfig, RunOutcome};

/// Run the backup script to completion, streaming output into the log.
///
/// Each completed output line is logged at TRACE under the `script` target.
/// Blocks until the child exits; there is deliberately no timeout, so a
/// hung script holds the job in its running state until it terminates.
pub fn run(config: &JobConfig) -> RunOutcome {
    run_with_sink(config, &mut |line| trace!(target: "script", "{line}"))
}

/// Same as [`run`], but the caller supplies the line sink.
///
/// The supervisor assumes the caller has already pre-flighted the script
/// path; a failure to start here is an OS-level launch error, reported as
/// [`RunOutcome::LaunchFailure`]. Exit code 0 maps to `Success`, anything
/// else to `NonZeroExit` with the code carried verbatim.
pub fn run_with_sink(config: &JobConfig, on_line: &mut dyn FnMut(&str)) -> RunOutcome {
    // One pipe carries both streams so lines arrive in the order the child
    // wrote them.
    let (mut reader, writer) = match pipe() {
        Ok(ends) => ends,
        Err(err) => return RunOutcome::LaunchFailure(format!("creating output pipe: {err}")),
    };
    let writer_for_stderr = match writer.try_clone() {
        Ok(clone) => clone,
        Err(err) => return RunOutcome::LaunchFailure(format!("cloning output pipe: {err}")),
    };

    let mut cmd = Command::new(&config.script);
    cmd.current_dir(&config.workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::from(writer))
        .stderr(Stdio::from(writer_for_stderr));

    debug!(script = ?config.script, workdir = ?config.workdir, "spawning backup script");

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => return RunOutcome::LaunchFailure(err.to_string()),
    };

    // The Command still holds our copies of the pipe's write end; drop them
    // or the read loop below never sees EOF.
    drop(cmd);

    let mut splitter = LineSplitter::new();
    let mut chunk = [0u8; 4096];
    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                for line in splitter.feed(&chunk[..n]) {
                    on_line(&line);
                }
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                warn!(error = %err, "reading backup script output failed");
                break;
            }
        }
    }

    if let Some(rest) = splitter.close() {
        on_line(&rest);
    }

    match child.wait() {
        Ok(status) if status.success() => RunOutcome::Success,
        Ok(status) => RunOutcome::NonZeroExit(status.code().unwrap_or(-1)),
        Err(err) => RunOutcome::LaunchFailure(format!("waiting for backup script: {err}")),
    }
}
