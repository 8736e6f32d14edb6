//! Timer error taxonomy
//!
//! The timer contract never returns these; a failed timer just reports
//! `is_initialized() == false`. They exist for diagnostics and for the
//! fallible edges (configuration validation).

use core::fmt;

/// Why a timer could not be initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// Every timer circuit is already claimed
    ResourceExhausted,
    /// A 0 ms timeout was requested
    InvalidTimeout,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::ResourceExhausted => f.write_str("no timer circuit available"),
            TimerError::InvalidTimeout => f.write_str("timeout must be at least 1 ms"),
        }
    }
}
