//! Timer configuration types
//!
//! A [`TimerConfig`] describes one logical timer. It can be stored alongside
//! the rest of the application settings when the `serde` feature is enabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TimerError;

pub use timekeeper_hal::timer::TickInterval;

/// Timeout used when none is configured
pub const DEFAULT_TIMEOUT_MS: u32 = 100;

/// Configuration of a single countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerConfig {
    /// Countdown length in milliseconds (must be non-zero)
    pub timeout_ms: u32,
    /// Start counting as soon as the timer is created
    pub start_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            start_enabled: false,
        }
    }
}

impl TimerConfig {
    /// Create a config for a stopped timer
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            start_enabled: false,
        }
    }

    /// Builder: start the timer right after creation
    pub const fn started(mut self) -> Self {
        self.start_enabled = true;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.timeout_ms == 0 {
            return Err(TimerError::InvalidTimeout);
        }
        Ok(())
    }
}
