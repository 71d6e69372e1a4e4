use std::time::{Duration, Instant};

/// Default delay between two generation or animation steps.
pub const STEP_DELAY_MS: i64 = 20;

/// One-shot, restartable timer.
///
/// The owner polls [`Timer::expired`] from its frame loop; an expiry is
/// reported once and disarms the timer, so periodic work re-arms it after
/// each step.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer `delay_ms` after `now`, replacing any pending expiry.
    /// A negative delay cancels it instead.
    pub fn start(&mut self, now: Instant, delay_ms: i64) {
        self.deadline = u64::try_from(delay_ms)
            .ok()
            .map(|ms| now + Duration::from_millis(ms));
    }

    #[inline]
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when `now` reaches the deadline.
    pub fn expired(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(at) if now >= at => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_delay() {
        let t0 = Instant::now();
        let mut t = Timer::new();
        t.start(t0, 20);
        assert!(!t.expired(t0));
        assert!(!t.expired(t0 + Duration::from_millis(19)));
        assert!(t.expired(t0 + Duration::from_millis(20)));
        assert!(!t.expired(t0 + Duration::from_millis(40)));
        assert!(!t.is_armed());
    }

    #[test]
    fn negative_delay_stops() {
        let t0 = Instant::now();
        let mut t = Timer::new();
        t.start(t0, 5);
        t.start(t0, -1);
        assert!(!t.is_armed());
        assert!(!t.expired(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn restart_pushes_deadline() {
        let t0 = Instant::now();
        let mut t = Timer::new();
        t.start(t0, 10);
        t.start(t0 + Duration::from_millis(8), 10);
        assert!(!t.expired(t0 + Duration::from_millis(12)));
        assert!(t.expired(t0 + Duration::from_millis(18)));
    }
}
