//! Tokio-backed [`Scheduler`] for headless playback.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use canvas::schedule::{Scheduler, TickCallback, TickControl};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Delivers ticks on a fixed period from a task on the current `LocalSet`.
///
/// The first tick lands immediately after `start`. Late ticks are skipped
/// rather than bunched, since playback derives its frame from elapsed time.
/// `start` must be called from within a `LocalSet`.
pub struct IntervalScheduler {
    period: Duration,
    running: Rc<Cell<bool>>,
    task: Option<JoinHandle<()>>,
}

impl IntervalScheduler {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self { period, running: Rc::new(Cell::new(false)), task: None }
    }
}

impl Scheduler for IntervalScheduler {
    fn start(&mut self, mut callback: TickCallback) {
        self.cancel();

        let running = Rc::new(Cell::new(true));
        let flag = Rc::clone(&running);
        let period = self.period;
        self.task = Some(tokio::task::spawn_local(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let origin = Instant::now();
            loop {
                interval.tick().await;
                if !flag.get() {
                    break;
                }
                let elapsed_ms = origin.elapsed().as_secs_f64() * 1000.0;
                if callback(elapsed_ms) == TickControl::Break {
                    flag.set(false);
                    break;
                }
            }
        }));
        self.running = running;
    }

    fn cancel(&mut self) {
        self.running.set(false);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
