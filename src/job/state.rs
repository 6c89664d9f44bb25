// src/job/state.rs

use parking_lot::Mutex;

/// Observable condition of the backup job.
///
/// `Idle` is the state at startup and after a successful run. `Alert` and
/// `Setup` persist until the next trigger; neither blocks future triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Alert,
    Setup,
}

/// Point-in-time copy of the job state for status reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub state: RunState,
    /// When the current (or most recent) run entered `Running`.
    pub run_started_at: Option<String>,
}

/// The job's state machine, shared between the trigger path and status
/// readers.
///
/// All mutation happens through the methods here, under one lock, so a
/// reader can never observe a torn update and two triggers can never both
/// win the transition into `Running`.
#[derive(Debug)]
pub struct JobState {
    inner: Mutex<StatusSnapshot>,
}

impl Default for JobState {
    fn default() -> Self {
        Self {
            inner: Mutex::new(StatusSnapshot {
                state: RunState::Idle,
                run_started_at: None,
            }),
        }
    }
}

impl JobState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.inner.lock().clone()
    }

    /// Attempt the transition into `Running`.
    ///
    /// The "is a run already in flight" check and the transition are one
    /// atomic step: returns `false` (and changes nothing) if a run is
    /// already in progress, otherwise records the start time and returns
    /// `true`. At most one caller can win until the run finishes.
    pub fn try_begin(&self, started_at: String) -> bool {
        let mut inner = self.inner.lock();
        if inner.state == RunState::Running {
            return false;
        }
        inner.state = RunState::Running;
        inner.run_started_at = Some(started_at);
        true
    }

    /// Pre-flight failed: the script is missing or not executable.
    pub fn mark_setup(&self) {
        self.inner.lock().state = RunState::Setup;
    }

    /// End the in-flight run: `Idle` on success, `Alert` on any failure.
    pub fn finish(&self, success: bool) {
        let mut inner = self.inner.lock();
        inner.state = if success {
            RunState::Idle
        } else {
            RunState::Alert
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_no_start_time() {
        let state = JobState::new();
        let snap = state.snapshot();
        assert_eq!(snap.state, RunState::Idle);
        assert_eq!(snap.run_started_at, None);
    }

    #[test]
    fn try_begin_wins_once() {
        let state = JobState::new();
        assert!(state.try_begin("t1".into()));
        assert!(!state.try_begin("t2".into()));

        let snap = state.snapshot();
        assert_eq!(snap.state, RunState::Running);
        assert_eq!(snap.run_started_at.as_deref(), Some("t1"));
    }

    #[test]
    fn finish_maps_success_and_failure() {
        let state = JobState::new();
        assert!(state.try_begin("t".into()));
        state.finish(true);
        assert_eq!(state.snapshot().state, RunState::Idle);

        assert!(state.try_begin("t".into()));
        state.finish(false);
        assert_eq!(state.snapshot().state, RunState::Alert);
    }

    #[test]
    fn begin_is_allowed_from_alert_and_setup() {
        let state = JobState::new();
        state.mark_setup();
        assert_eq!(state.snapshot().state, RunState::Setup);
        assert!(state.try_begin("t".into()));

        state.finish(false);
        assert_eq!(state.snapshot().state, RunState::Alert);
        assert!(state.try_begin("t".into()));
    }
}
