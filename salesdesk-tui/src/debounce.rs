//! Settle-delay debouncing for rapid user input.

use std::time::Duration;
use std::time::Instant;

/// Coalesces rapid updates into a single delayed emission.
///
/// Each [`touch`](Debouncer::touch) replaces the pending value and restarts
/// the settle delay; [`poll`](Debouncer::poll) (called on the UI tick)
/// releases the value once the delay has elapsed with no further touches.
/// [`flush`](Debouncer::flush) releases immediately (e.g. on Enter).
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(Instant, String)>,
}

impl Debouncer {
    /// Creates a debouncer with the given settle delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces the pending value and restarts the settle delay.
    pub fn touch(&mut self, value: impl Into<String>) {
        self.pending = Some((Instant::now(), value.into()));
    }

    /// Returns the pending value once the settle delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((touched, _)) if now.duration_since(*touched) >= self.delay => {
                self.pending.take().map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Releases the pending value immediately.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take().map(|(_, v)| v)
    }

    /// Returns `true` while a value is waiting out its delay.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_touches_coalesce_into_one_emission() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let start = Instant::now();

        debouncer.touch("a");
        debouncer.touch("ac");
        debouncer.touch("acm");
        debouncer.touch("acme");

        // Not settled yet.
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);
        // Settled: only the last value comes out, exactly once.
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(400)),
            Some("acme".to_string())
        );
        assert_eq!(debouncer.poll(start + Duration::from_millis(800)), None);
    }

    #[test]
    fn flush_skips_the_delay() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        debouncer.touch("now");
        assert_eq!(debouncer.flush(), Some("now".to_string()));
        assert!(!debouncer.is_pending());
    }
}
