//! Countdown state machine
//!
//! A [`Countdown`] turns a millisecond timeout into a number of interrupt
//! ticks and counts them down. It knows nothing about circuits or callbacks:
//! [`Countdown::tick`] reports the single tick on which the timeout happened
//! and the owner reacts to it.
//!
//! # Cycle
//!
//! ```text
//!   stopped ──start──▶ counting ──threshold reached──▶ timed out
//!      ▲                  │  ▲                             │
//!      └──────stop────────┘  └──────────restart────────────┘
//! ```
//!
//! `stop`/`start` pause and resume without losing progress. Only `restart`
//! clears the tick count and the timeout flag.

use crate::config::{TickInterval, TimerConfig};
use crate::error::TimerError;

/// Number of ticks equivalent to `timeout_ms`
///
/// `round(timeout_ms / interval)` with halves rounded away from zero, done
/// in 64-bit microseconds. A non-zero timeout always needs at least one tick;
/// results beyond `u32::MAX` saturate. A 0 ms timeout yields 0.
pub fn tick_threshold(timeout_ms: u32, interval: TickInterval) -> u32 {
    if timeout_ms == 0 {
        return 0;
    }

    let interval_us = u64::from(interval.as_micros());
    let timeout_us = u64::from(timeout_ms) * 1000;
    let ticks = (timeout_us + interval_us / 2) / interval_us;

    ticks.clamp(1, u64::from(u32::MAX)) as u32
}

/// Per-timer countdown state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    interval: TickInterval,
    timeout_ms: u32,
    /// Ticks needed to reach `timeout_ms`
    threshold: u32,
    /// Ticks since the last restart
    ticks: u32,
    enabled: bool,
    timed_out: bool,
}

impl Countdown {
    /// Create a stopped countdown
    ///
    /// Returns `None` for a 0 ms timeout.
    pub fn new(timeout_ms: u32, interval: TickInterval) -> Option<Self> {
        Self::from_config(TimerConfig::new(timeout_ms), interval).ok()
    }

    /// Create a countdown from a validated configuration
    ///
    /// Starts enabled when `config.start_enabled` is set.
    pub fn from_config(config: TimerConfig, interval: TickInterval) -> Result<Self, TimerError> {
        config.validate()?;
        Ok(Self {
            interval,
            timeout_ms: config.timeout_ms,
            threshold: tick_threshold(config.timeout_ms, interval),
            ticks: 0,
            enabled: config.start_enabled,
            timed_out: false,
        })
    }

    /// Configured timeout in milliseconds
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Change the timeout
    ///
    /// A 0 ms timeout is ignored. Returns whether the timeout was changed.
    /// Accumulated ticks are kept; if they already exceed the new threshold
    /// the timeout fires on the next tick.
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) -> bool {
        if timeout_ms == 0 {
            return false;
        }
        self.timeout_ms = timeout_ms;
        self.threshold = tick_threshold(timeout_ms, self.interval);
        true
    }

    /// Ticks needed to time out
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Ticks counted in the current cycle
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Ticks left before the timeout (0 once timed out)
    pub fn remaining_ticks(&self) -> u32 {
        self.threshold.saturating_sub(self.ticks)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_timed_out(&self) -> bool {
        self.timed_out
    }

    /// Resume counting
    pub fn start(&mut self) {
        self.enabled = true;
    }

    /// Pause counting
    pub fn stop(&mut self) {
        self.enabled = false;
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Begin a fresh cycle from zero ticks
    pub fn restart(&mut self) {
        self.ticks = 0;
        self.timed_out = false;
        self.enabled = true;
    }

    /// Count one interrupt tick
    ///
    /// Returns `true` on exactly the tick that reaches the threshold. Ticks
    /// while stopped or after the timeout are ignored.
    pub fn tick(&mut self) -> bool {
        if !self.enabled || self.timed_out {
            return false;
        }

        self.ticks = self.ticks.saturating_add(1);
        if self.ticks >= self.threshold {
            self.timed_out = true;
            return true;
        }
        false
    }
}
