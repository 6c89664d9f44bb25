// src/job/backup.rs

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::Paths;
use crate::exec::supervisor;
use crate::job::state::{JobState, RunState};
use crate::job::{JobConfig, RunOutcome, TriggerOutcome, TriggerReason};
use crate::store::TimestampStore;

/// The orchestrator: one logical recurring job, triggered by the timer or
/// by hand, never more than one run in flight.
///
/// `trigger` does blocking work (process spawn, blocking reads, wait for
/// exit); callers invoke it from a context that may block.
pub struct BackupJob {
    paths: Paths,
    script_name: String,
    state: Arc<JobState>,
    store: Arc<dyn TimestampStore>,
}

impl BackupJob {
    pub fn new(
        paths: Paths,
        script_name: String,
        state: Arc<JobState>,
        store: Arc<dyn TimestampStore>,
    ) -> Self {
        Self {
            paths,
            script_name,
            state,
            store,
        }
    }

    pub fn state(&self) -> &Arc<JobState> {
        &self.state
    }

    /// The single entry point for both scheduled and manual triggers.
    ///
    /// If a run is already in flight the trigger is logged and absorbed.
    /// Otherwise: pre-flight the script (missing or non-executable resolves
    /// to the setup state without spawning anything), enter the running
    /// state, supervise the script, and record the outcome.
    pub fn trigger(&self, reason: TriggerReason) -> TriggerOutcome {
        debug!(?reason, "backup trigger");

        if self.state.snapshot().state == RunState::Running {
            info!("backup already running");
            return TriggerOutcome::Skipped;
        }

        // Resolved fresh on every trigger so permission or path fixes are
        // picked up without a restart.
        let config = self.resolve_config();

        if !config.script.exists() {
            info!(script = ?config.script, "backup script not found, needs configuration");
            self.state.mark_setup();
            return TriggerOutcome::Ran(RunOutcome::NotConfigured);
        }
        if !is_executable(&config.script) {
            error!(
                script = ?config.script,
                "backup script is not executable (e.g. run: chmod +x {})",
                self.script_name
            );
            self.state.mark_setup();
            return TriggerOutcome::Ran(RunOutcome::NotExecutable);
        }

        // The gate proper: atomic with entering the running state. A lost
        // race against another trigger lands here.
        if !self.state.try_begin(now_string()) {
            info!("backup already running");
            return TriggerOutcome::Skipped;
        }

        info!("starting backup");
        let outcome = supervisor::run(&config);

        match &outcome {
            RunOutcome::Success => {
                info!("backup complete");
                if let Err(err) = self.store.set(&now_string()) {
                    error!(error = %err, "failed to persist last-backup time");
                }
                self.state.finish(true);
            }
            RunOutcome::NonZeroExit(code) => {
                warn!(exit_code = code, "backup failed");
                self.state.finish(false);
            }
            RunOutcome::LaunchFailure(reason) => {
                error!(%reason, "failed to launch backup script");
                self.state.finish(false);
            }
            // The supervisor never produces these; pre-flight returned above.
            RunOutcome::NotConfigured | RunOutcome::NotExecutable => {
                self.state.finish(false);
            }
        }

        TriggerOutcome::Ran(outcome)
    }

    fn resolve_config(&self) -> JobConfig {
        JobConfig {
            script: self.paths.script_file(&self.script_name),
            workdir: self.paths.dir.clone(),
        }
    }
}

/// Local wall-clock time in the form stored and shown to the user.
fn now_string() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
