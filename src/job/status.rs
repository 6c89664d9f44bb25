// src/job/status.rs

//! Human-readable status strings.
//!
//! Pure functions of a [`StatusSnapshot`]; whatever surface displays status
//! (CLI, tray, logs) calls in here rather than interpreting states itself.

use crate::job::state::{RunState, StatusSnapshot};

/// One-line status for the current run state.
pub fn status_text(snapshot: &StatusSnapshot) -> String {
    let started = snapshot.run_started_at.as_deref().unwrap_or("unknown");
    match snapshot.state {
        RunState::Idle => "idle".to_string(),
        RunState::Running => format!("started at {started}"),
        RunState::Alert => format!("failed at {started} — see log"),
        RunState::Setup => "needs configuration".to_string(),
    }
}

/// Display form of the persisted last-backup timestamp.
pub fn last_backup_text(last: Option<&str>) -> String {
    last.unwrap_or("none").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(state: RunState, started: Option<&str>) -> StatusSnapshot {
        StatusSnapshot {
            state,
            run_started_at: started.map(str::to_string),
        }
    }

    #[test]
    fn idle_and_setup_have_fixed_text() {
        assert_eq!(status_text(&snap(RunState::Idle, None)), "idle");
        assert_eq!(
            status_text(&snap(RunState::Setup, None)),
            "needs configuration"
        );
    }

    #[test]
    fn running_and_alert_include_the_start_time() {
        assert_eq!(
            status_text(&snap(RunState::Running, Some("2026-01-02 03:04:05"))),
            "started at 2026-01-02 03:04:05"
        );
        assert_eq!(
            status_text(&snap(RunState::Alert, Some("2026-01-02 03:04:05"))),
            "failed at 2026-01-02 03:04:05 — see log"
        );
    }

    #[test]
    fn last_backup_defaults_to_none() {
        assert_eq!(last_backup_text(None), "none");
        assert_eq!(last_backup_text(Some("yesterday")), "yesterday");
    }
}
