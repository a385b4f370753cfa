use std::time::{Duration, Instant};

/// How often the UI loop polls for input and drains due ticks
pub const DEFAULT_POLL_MS: u64 = 250;

/// Period of one timer tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Get the UI poll duration
pub fn poll_duration() -> Duration {
    Duration::from_millis(DEFAULT_POLL_MS)
}

/// Cancellable one-second tick schedule.
///
/// While armed, the handle remembers when the next tick is due; the owner
/// drains elapsed ticks with [`TickHandle::due_ticks`]. A cancelled handle
/// never yields another tick until it is armed again.
#[derive(Debug, Clone, Default)]
pub struct TickHandle {
    next_due: Option<Instant>,
}

impl TickHandle {
    /// Start ticking, first tick one interval after `now`
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + TICK_INTERVAL);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of whole ticks that fell due by `now`; advances the schedule past them
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let late = now.duration_since(due);
        let extra = (late.as_millis() / TICK_INTERVAL.as_millis()) as u32;
        let count = extra.saturating_add(1);
        self.next_due = Some(due + TICK_INTERVAL * count);
        count
    }

    /// Time until the next tick, if armed
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_duration() {
        assert_eq!(poll_duration(), Duration::from_millis(250));
    }

    #[test]
    fn test_unarmed_handle_never_ticks() {
        let mut handle = TickHandle::default();
        let now = Instant::now();
        assert_eq!(handle.due_ticks(now + Duration::from_secs(10)), 0);
    }

    #[test]
    fn test_ticks_accumulate_by_whole_seconds() {
        let start = Instant::now();
        let mut handle = TickHandle::default();
        handle.arm(start);

        assert_eq!(handle.due_ticks(start + Duration::from_millis(999)), 0);
        assert_eq!(handle.due_ticks(start + Duration::from_millis(1000)), 1);
        assert_eq!(handle.due_ticks(start + Duration::from_millis(1500)), 0);
        assert_eq!(handle.due_ticks(start + Duration::from_millis(4200)), 3);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let start = Instant::now();
        let mut handle = TickHandle::default();
        handle.arm(start);
        handle.cancel();

        assert!(!handle.is_armed());
        assert_eq!(handle.due_ticks(start + Duration::from_secs(5)), 0);
        assert_eq!(handle.time_until_next(start), None);
    }
}
