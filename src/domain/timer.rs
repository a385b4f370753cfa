use super::enums::TimerMode;
use crate::ticker::TickHandle;
use std::time::{Duration, Instant};

/// Default focus phase length (25 minutes)
pub const DEFAULT_WORK_SECS: u32 = 25 * 60;
/// Default break phase length (5 minutes)
pub const DEFAULT_BREAK_SECS: u32 = 5 * 60;

/// Length of each phase in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub work_secs: u32,
    pub break_secs: u32,
}

impl PhaseDurations {
    pub fn for_mode(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_secs,
            TimerMode::Break => self.break_secs,
        }
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            work_secs: DEFAULT_WORK_SECS,
            break_secs: DEFAULT_BREAK_SECS,
        }
    }
}

/// Emitted once when a phase runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub finished: TimerMode,
    pub next: TimerMode,
}

/// Work/break countdown.
///
/// The tick source is owned here and is cancelled on every path that stops
/// the countdown: pause, reset, phase switch, zero crossing and shutdown.
#[derive(Debug, Clone)]
pub struct Timer {
    mode: TimerMode,
    running: bool,
    remaining_secs: u32,
    durations: PhaseDurations,
    ticker: TickHandle,
}

impl Timer {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            mode: TimerMode::Work,
            running: false,
            remaining_secs: durations.work_secs,
            durations,
            ticker: TickHandle::default(),
        }
    }

    /// Rebuild a stopped timer at a given point in a phase
    #[cfg(test)]
    pub fn restore(mode: TimerMode, remaining_secs: u32, durations: PhaseDurations) -> Self {
        Self {
            mode,
            running: false,
            remaining_secs,
            durations,
            ticker: TickHandle::default(),
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    pub fn is_tick_armed(&self) -> bool {
        self.ticker.is_armed()
    }

    /// How long until the next tick is due; `None` while stopped
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_next(now)
    }

    /// Fraction of the current phase already elapsed, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        let total = self.durations.for_mode(self.mode);
        if total == 0 {
            return 0.0;
        }
        let done = total.saturating_sub(self.remaining_secs);
        (done as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.ticker.arm(now);
        }
    }

    pub fn pause(&mut self) {
        self.running = false;
        self.ticker.cancel();
    }

    /// Start/pause toggle; never touches the remaining time
    pub fn toggle(&mut self, now: Instant) {
        if self.running {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// Stop and refill the current phase
    pub fn reset(&mut self) {
        self.pause();
        self.remaining_secs = self.durations.for_mode(self.mode);
    }

    /// Switch to `mode`, stopped and full
    pub fn select_phase(&mut self, mode: TimerMode) {
        self.pause();
        self.mode = mode;
        self.remaining_secs = self.durations.for_mode(mode);
    }

    /// Stop ticking for good (session teardown)
    pub fn shutdown(&mut self) {
        self.pause();
    }

    /// One elapsed second. Returns the phase change on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<PhaseChange> {
        if !self.running || self.remaining_secs == 0 {
            return None;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            Some(self.finish_phase())
        } else {
            None
        }
    }

    /// Apply every tick that fell due by `now`. Stops at the zero crossing.
    pub fn advance(&mut self, now: Instant) -> Option<PhaseChange> {
        if !self.running {
            return None;
        }

        let due = self.ticker.due_ticks(now);
        for _ in 0..due {
            if let Some(change) = self.tick() {
                return Some(change);
            }
        }
        None
    }

    fn finish_phase(&mut self) -> PhaseChange {
        let finished = self.mode;
        self.pause();
        self.mode = finished.flipped();
        self.remaining_secs = self.durations.for_mode(self.mode);
        PhaseChange {
            finished,
            next: self.mode,
        }
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}
