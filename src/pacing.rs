//! Fixed-rate frame gate
//!
//! A tick runs only once the minimum interval has passed since the previous
//! admitted tick. Early polls are dropped outright; nothing is queued, so a
//! stalled frame never causes a burst of catch-up ticks.

use std::time::{Duration, Instant};

use crate::consts::FRAME_INTERVAL;

#[derive(Debug, Clone)]
pub struct FrameGate {
    interval: Duration,
    last_tick: Option<Instant>,
    admitted: u64,
    skipped: u64,
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl FrameGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
            admitted: 0,
            skipped: 0,
        }
    }

    /// Whether a tick may run at `now`; admitting it restarts the interval
    pub fn ready(&mut self, now: Instant) -> bool {
        let due = match self.last_tick {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_tick = Some(now);
            self.admitted += 1;
        } else {
            self.skipped += 1;
        }
        due
    }

    /// Time left until the next tick would be admitted
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn admitted(&self) -> u64 {
        self.admitted
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
