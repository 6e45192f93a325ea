//! Repeating timers with suspend/resume.
//!
//! Each timer owns its task handle. Arming always cancels the live task
//! first, so a timer never has more than one task running.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

const MIN_PERIOD: Duration = Duration::from_millis(1);

type Tick = Arc<dyn Fn() + Send + Sync>;

/// Calls `tick` once per period while running.
///
/// Must be started from inside a tokio runtime.
pub struct RepeatingTimer {
    label: String,
    period: Duration,
    tick: Tick,
    handle: Option<JoinHandle<()>>,
}

impl RepeatingTimer {
    pub fn new(label: impl Into<String>, period: Duration, tick: impl Fn() + Send + Sync + 'static) -> Self {
        RepeatingTimer {
            label: label.into(),
            period: period.max(MIN_PERIOD),
            tick: Arc::new(tick),
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Arm the timer. The first tick comes one full period from now.
    pub fn start(&mut self) {
        self.cancel();

        let period = self.period;
        let tick = Arc::clone(&self.tick);

        tracing::debug!(timer = %self.label, ?period, "timer armed");

        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        }));
    }

    pub fn stop(&mut self) {
        if self.cancel() {
            tracing::debug!(timer = %self.label, "timer stopped");
        }
    }

    /// Pause while the pointer is over the container.
    pub fn suspend(&mut self) {
        if self.cancel() {
            tracing::debug!(timer = %self.label, "timer paused");
        }
    }

    /// Resume after the pointer leaves. Remaining time is not preserved;
    /// the next tick is a full period away.
    pub fn resume(&mut self) {
        tracing::debug!(timer = %self.label, "timer resumed");
        self.start();
    }

    fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for RepeatingTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for RepeatingTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepeatingTimer")
            .field("label", &self.label)
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}
