// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod job;
pub mod logging;
pub mod sched;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, anyhow};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{Paths, bootstrap, load_settings};
use crate::job::status::last_backup_text;
use crate::job::{BackupJob, JobState, RunOutcome, TriggerOutcome, TriggerReason};
use crate::sched::{Event, Scheduler};
use crate::store::{FileStore, TimestampStore};

/// High-level entry point used by `main.rs`.
///
/// Wires together:
/// - configuration directory bootstrap + settings
/// - the run-state machine and last-backup store
/// - the timer, signal handlers, and the job itself
///
/// Blocking work (the backup run) happens on the blocking pool; the loop
/// here only routes triggers and shutdown.
pub async fn run(args: CliArgs) -> Result<()> {
    let paths = Paths::resolve(args.dir.clone())?;
    bootstrap(&paths)?;
    let settings = load_settings(&paths)?;

    let initial_delay = args
        .initial_delay
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.timer.initial_delay());
    let period = args
        .period
        .map(Duration::from_secs)
        .unwrap_or_else(|| settings.timer.period());

    let state = Arc::new(JobState::new());
    let store: Arc<dyn TimestampStore> = Arc::new(FileStore::new(paths.last_backup_file()));

    match store.get() {
        Ok(last) => info!(last_backup = %last_backup_text(last.as_deref()), "brolly starting"),
        Err(err) => warn!(error = %err, "could not read last-backup time"),
    }

    let job = Arc::new(BackupJob::new(
        paths.clone(),
        settings.job.script.clone(),
        state,
        store,
    ));

    if args.once {
        return run_once(job).await;
    }

    let (events_tx, mut events_rx) = mpsc::channel::<Event>(16);
    let scheduler = Scheduler::start(initial_delay, period, events_tx.clone());

    spawn_signal_listeners(events_tx);

    info!(dir = ?paths.dir, period_secs = period.as_secs(), "brolly started");

    let mut runs: JoinSet<TriggerOutcome> = JoinSet::new();
    while let Some(event) = events_rx.recv().await {
        match event {
            Event::Trigger(reason) => {
                let job = Arc::clone(&job);
                runs.spawn_blocking(move || job.trigger(reason));
                // reap whatever has finished so the set stays small
                while runs.try_join_next().is_some() {}
            }
            Event::Shutdown => {
                info!("shutdown requested");
                scheduler.stop();
                break;
            }
        }
    }

    // Graceful drain: never interrupt an in-flight backup.
    while runs.join_next().await.is_some() {}
    scheduler.join().await;

    info!("brolly exiting");
    Ok(())
}

/// `--once` mode: a single manual trigger, exit status per outcome.
async fn run_once(job: Arc<BackupJob>) -> Result<()> {
    let outcome = tokio::task::spawn_blocking(move || job.trigger(TriggerReason::Manual)).await?;
    match outcome {
        TriggerOutcome::Ran(RunOutcome::Success) => Ok(()),
        TriggerOutcome::Ran(other) => Err(anyhow!("backup failed: {other}")),
        // Nothing else can hold the gate in --once mode.
        TriggerOutcome::Skipped => Ok(()),
    }
}

/// Ctrl-C requests shutdown; on unix, SIGUSR1 is the manual "backup now"
/// trigger and shares the exact event path with the timer.
fn spawn_signal_listeners(events_tx: mpsc::Sender<Event>) {
    {
        let tx = events_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!(error = %err, "failed to listen for Ctrl+C");
                return;
            }
            let _ = tx.send(Event::Shutdown).await;
        });
    }

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let tx = events_tx;
        tokio::spawn(async move {
            let mut usr1 = match signal(SignalKind::user_defined1()) {
                Ok(sig) => sig,
                Err(err) => {
                    warn!(error = %err, "failed to listen for SIGUSR1");
                    return;
                }
            };
            while usr1.recv().await.is_some() {
                if tx.send(Event::Trigger(TriggerReason::Manual)).await.is_err() {
                    return;
                }
            }
        });
    }

    #[cfg(not(unix))]
    drop(events_tx);
}
