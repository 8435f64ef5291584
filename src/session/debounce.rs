use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Single-shot delayed task where the most recent arm wins.
///
/// Nothing runs on its own: the owner polls `take_due` from its event loop
/// or sleeps until `deadline`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    name: &'static str,
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(name: &'static str, delay: Duration) -> Self {
        Self {
            name,
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `task` at `now + delay`, replacing anything pending.
    pub fn arm(&mut self, now: Instant, task: T) {
        let replaced = self.pending.is_some();
        self.pending = Some((now + self.delay, task));
        trace!(debouncer = self.name, replaced, "debounce armed");
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, task)| task)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Removes and returns the task if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => {
                trace!(debouncer = self.name, "debounce fired");
                self.cancel()
            }
            _ => None,
        }
    }
}
