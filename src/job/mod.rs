// src/job/mod.rs

//! The backup job itself.
//!
//! - [`state`] holds the run-state machine (`Idle`/`Running`/`Alert`/`Setup`)
//!   and the single-flight guard.
//! - [`backup`] is the orchestrator: gate, pre-flight, supervise, record the
//!   outcome.
//! - [`status`] maps a state snapshot to the human-readable status line.

pub mod backup;
pub mod state;
pub mod status;

use std::fmt;
use std::path::PathBuf;

pub use backup::BackupJob;
pub use state::{JobState, RunState, StatusSnapshot};

/// Why a trigger fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    Scheduled,
    Manual,
}

/// Result of one supervised execution (or of the pre-flight that prevented
/// one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The script ran and exited 0.
    Success,
    /// The script ran and exited non-zero; the code is carried verbatim.
    NonZeroExit(i32),
    /// The OS refused to start the process (spawn error, bad workdir, ...).
    LaunchFailure(String),
    /// No script exists at the configured path.
    NotConfigured,
    /// The script exists but lacks execute permission.
    NotExecutable,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Success => write!(f, "success"),
            RunOutcome::NonZeroExit(code) => write!(f, "exit code {code}"),
            RunOutcome::LaunchFailure(reason) => write!(f, "launch failure: {reason}"),
            RunOutcome::NotConfigured => write!(f, "backup script not found"),
            RunOutcome::NotExecutable => write!(f, "backup script is not executable"),
        }
    }
}

/// What a single call to [`BackupJob::trigger`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A run was already in flight; the trigger was absorbed.
    Skipped,
    /// The trigger went through the full path and produced an outcome.
    Ran(RunOutcome),
}

/// Per-run descriptor for the process to supervise.
///
/// Re-resolved on every trigger rather than cached, so a user fixing the
/// script or its permissions mid-session is picked up on the next run.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Absolute path of the script to execute, with no arguments.
    pub script: PathBuf,
    /// Working directory for the child (the configuration directory).
    pub workdir: PathBuf,
}
