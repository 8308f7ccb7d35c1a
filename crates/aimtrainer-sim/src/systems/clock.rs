//! Session countdown.
//!
//! The clock hands out a `ClockToken` each time it is armed. Stopping it
//! advances the epoch, so any tick the driver still has in flight for an
//! earlier arming is ignored.

use serde::{Deserialize, Serialize};

/// Proof that a tick belongs to the current arming of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClockToken(u64);

/// Result of delivering one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Stale token or stopped clock. Nothing changed.
    Ignored,
    /// One second elapsed; this much remains.
    Running { time_left: u32 },
    /// The countdown just reached zero. Reported exactly once.
    Expired,
}

#[derive(Debug, Default)]
pub struct SessionClock {
    time_left: u32,
    epoch: u64,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop and load a fresh countdown.
    pub fn reset(&mut self, duration_secs: u32) {
        self.stop();
        self.time_left = duration_secs;
    }

    /// Arm the clock and return the token for its ticks.
    pub fn start(&mut self) -> ClockToken {
        self.epoch += 1;
        self.running = true;
        ClockToken(self.epoch)
    }

    /// Disarm. Every outstanding token becomes stale.
    pub fn stop(&mut self) {
        self.epoch += 1;
        self.running = false;
    }

    /// Token for the current arming, if the clock is running.
    pub fn token(&self) -> Option<ClockToken> {
        self.running.then_some(ClockToken(self.epoch))
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Advance by one second.
    pub fn tick(&mut self, token: ClockToken) -> ClockTick {
        if !self.running || token.0 != self.epoch {
            return ClockTick::Ignored;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.stop();
            ClockTick::Expired
        } else {
            ClockTick::Running {
                time_left: self.time_left,
            }
        }
    }
}
