#![cfg(unix)]

use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use brolly::exec::supervisor;
use brolly::job::{JobConfig, RunOutcome};

type TestResult = Result<(), Box<dyn Error>>;

fn write_script(dir: &Path, body: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join("run.sh");
    fs::write(&path, format!("#!/bin/sh\n{body}"))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

fn run_collecting(config: &JobConfig) -> (RunOutcome, Vec<String>) {
    let mut lines = Vec::new();
    let outcome = supervisor::run_with_sink(config, &mut |line| lines.push(line.to_string()));
    (outcome, lines)
}

#[test]
fn stdout_and_stderr_arrive_merged_and_in_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let script = write_script(
        dir.path(),
        "echo out1\necho err1 >&2\necho out2\nprintf 'tail without newline'\n",
    )?;

    let config = JobConfig {
        script,
        workdir: dir.path().to_path_buf(),
    };
    let (outcome, lines) = run_collecting(&config);

    assert_eq!(outcome, RunOutcome::Success);
    // One pipe carries both streams, so the shell's sequential writes come
    // back in exactly the order they were made; the unterminated tail is
    // flushed as a final line.
    assert_eq!(lines, vec!["out1", "err1", "out2", "tail without newline"]);
    Ok(())
}

#[test]
fn nonzero_exit_code_is_carried_verbatim() -> TestResult {
    let dir = tempfile::tempdir()?;
    let script = write_script(dir.path(), "echo about to fail\nexit 3\n")?;

    let config = JobConfig {
        script,
        workdir: dir.path().to_path_buf(),
    };
    let (outcome, lines) = run_collecting(&config);

    assert_eq!(outcome, RunOutcome::NonZeroExit(3));
    assert_eq!(lines, vec!["about to fail"]);
    Ok(())
}

#[test]
fn silent_script_produces_no_lines() -> TestResult {
    let dir = tempfile::tempdir()?;
    let script = write_script(dir.path(), "exit 0\n")?;

    let config = JobConfig {
        script,
        workdir: dir.path().to_path_buf(),
    };
    let (outcome, lines) = run_collecting(&config);

    assert_eq!(outcome, RunOutcome::Success);
    assert!(lines.is_empty());
    Ok(())
}

#[test]
fn script_runs_with_the_configured_working_directory() -> TestResult {
    let dir = tempfile::tempdir()?;
    let script = write_script(dir.path(), "pwd\n")?;

    let config = JobConfig {
        script,
        workdir: dir.path().to_path_buf(),
    };
    let (outcome, lines) = run_collecting(&config);

    assert_eq!(outcome, RunOutcome::Success);
    assert_eq!(lines.len(), 1);
    // Compare canonicalized paths; tempdirs often sit behind symlinks.
    assert_eq!(
        fs::canonicalize(&lines[0])?,
        fs::canonicalize(dir.path())?
    );
    Ok(())
}

#[test]
fn missing_working_directory_is_a_launch_failure() -> TestResult {
    let dir = tempfile::tempdir()?;
    let script = write_script(dir.path(), "exit 0\n")?;

    let config = JobConfig {
        script,
        workdir: dir.path().join("does-not-exist"),
    };
    let (outcome, lines) = run_collecting(&config);

    assert!(matches!(outcome, RunOutcome::LaunchFailure(_)));
    assert!(lines.is_empty());
    Ok(())
}
