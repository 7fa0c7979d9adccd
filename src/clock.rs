use std::time::{Duration, Instant};

/// Fixed-cadence tick gate polled once per frame.
///
/// Fires at most once per poll and measures from the instant of the last
/// tick, so time spent stopped is never paid back as a burst of ticks.
#[derive(Debug)]
pub struct TickClock {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        TickClock {
            interval,
            last_tick: None,
        }
    }

    /// Starting an already running clock also resets its reference instant.
    pub fn start(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    pub fn stop(&mut self) {
        self.last_tick = None;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Applies from the next due check onward; the reference instant is kept.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_tick {
            Some(last) if now.saturating_duration_since(last) >= self.interval => {
                self.last_tick = Some(now);
                true
            }
            _ => false,
        }
    }
}
