//! Timer stub
//!
//! Stands in for a real timer when testing code that consumes the [`Timer`]
//! trait. It never claims a circuit and never counts ticks; tests decide when
//! it has timed out through [`StubTimer::set_timed_out`].

use timekeeper_hal::Timer;

/// Timer stub
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StubTimer {
    initialized: bool,
    enabled: bool,
    timed_out: bool,
}

impl Default for StubTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StubTimer {
    /// Create a stopped stub timer
    pub fn new() -> Self {
        Self {
            initialized: true,
            enabled: false,
            timed_out: false,
        }
    }

    /// Set the timeout status
    pub fn set_timed_out(&mut self, timed_out: bool) {
        if self.initialized {
            self.timed_out = timed_out;
        }
    }
}

impl Timer for StubTimer {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn has_timed_out(&self) -> bool {
        self.timed_out
    }

    fn timeout_ms(&self) -> u32 {
        // Timeout is irrelevant for the stub
        0
    }

    fn set_timeout_ms(&mut self, _timeout_ms: u32) {}

    fn start(&mut self) {
        if self.initialized {
            self.enabled = true;
        }
    }

    fn stop(&mut self) {
        if self.initialized {
            self.enabled = false;
        }
    }

    fn toggle(&mut self) {
        if self.initialized {
            self.enabled = !self.enabled;
        }
    }

    fn restart(&mut self) {
        if self.initialized {
            self.enabled = true;
            self.timed_out = false;
        }
    }

    fn handle_callback(&mut self) {}
}
