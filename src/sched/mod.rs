// src/sched/mod.rs

//! The recurring timer.
//!
//! Fires once after a short initial delay, then at a fixed period. Each
//! firing sends one [`Event::Trigger`]; firings are never queued — if the
//! previous run is still going the trigger still reaches the job, whose
//! single-flight guard turns it into a no-op.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use crate::job::TriggerReason;

/// Events flowing into the main loop from the timer, signal handlers, and
/// any manual-trigger surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Trigger(TriggerReason),
    Shutdown,
}

/// Handle to the running timer task.
pub struct Scheduler {
    stop_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Scheduler {
    /// Arm the timer: first fire after `initial_delay`, then every `period`.
    pub fn start(
        initial_delay: Duration,
        period: Duration,
        events_tx: mpsc::Sender<Event>,
    ) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            debug!(?initial_delay, ?period, "timer armed");

            tokio::select! {
                _ = sleep(initial_delay) => {}
                _ = stop_rx.changed() => {
                    debug!("timer stopped before first fire");
                    return;
                }
            }

            loop {
                debug!("timer fired");
                if events_tx
                    .send(Event::Trigger(TriggerReason::Scheduled))
                    .await
                    .is_err()
                {
                    debug!("event channel closed, timer exiting");
                    return;
                }

                tokio::select! {
                    _ = sleep(period) => {}
                    _ = stop_rx.changed() => {
                        debug!("timer stopped");
                        return;
                    }
                }
            }
        });

        Self { stop_tx, handle }
    }

    /// Cancel future firings. Never interrupts a run already in flight.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Wait for the timer task to wind down (after [`stop`](Self::stop)).
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[tokio::test]
    async fn fires_after_the_initial_delay_then_periodically() {
        let (tx, mut rx) = mpsc::channel(8);
        let sched = Scheduler::start(Duration::from_millis(10), Duration::from_millis(25), tx);

        let first = timeout(Duration::from_secs(2), rx.recv()).await;
        assert_eq!(first.unwrap(), Some(Event::Trigger(TriggerReason::Scheduled)));

        let second = timeout(Duration::from_secs(2), rx.recv()).await;
        assert_eq!(second.unwrap(), Some(Event::Trigger(TriggerReason::Scheduled)));

        sched.stop();
        sched.join().await;
    }

    #[tokio::test]
    async fn stop_before_first_fire_cancels_everything() {
        let (tx, mut rx) = mpsc::channel(8);
        let sched = Scheduler::start(Duration::from_secs(3600), Duration::from_secs(3600), tx);

        sched.stop();
        sched.join().await;

        // Sender side is gone once the timer task exits.
        assert_eq!(rx.recv().await, None);
    }
}
