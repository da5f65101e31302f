use std::time::{Duration, Instant};

/// Coalesces bursts of input events so a re-derivation runs once per quiet
/// window instead of once per keystroke. Scheduling aid only: derivations
/// are idempotent, so a missed or extra fire is harmless.
///
/// Callers `record` each event and poll `ready`; the first poll at or after
/// the deadline fires and disarms.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Quiet window used for search/filter inputs.
    pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Note an input event at `now`, pushing the deadline out by one window.
    pub fn record(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True once the window has elapsed since the last recorded event.
    /// Fires at most once per burst.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}
