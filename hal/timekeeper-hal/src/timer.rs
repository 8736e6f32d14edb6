//! Countdown timer abstractions
//!
//! [`Timer`] is the capability every timer variant provides, whether it is
//! backed by a physical circuit or is a test stub. [`CircuitRegisters`] is
//! the narrow register contract a hardware-backed timer needs from the chip.
//!
//! None of the operations can fail. An operation that makes no sense for the
//! current state (starting a timer that never got a circuit, for example) is
//! a no-op, because tick delivery runs in interrupt context where there is
//! nobody to report an error to. Check [`Timer::is_initialized`] first.

/// Countdown timer capability
pub trait Timer {
    /// Check if the timer is initialized.
    ///
    /// An uninitialized timer indicates that no timer circuit was available
    /// when the timer was created, or that it was created with a 0 ms
    /// timeout. It stays uninitialized for its whole lifetime.
    fn is_initialized(&self) -> bool;

    /// Check whether the countdown is active
    fn is_enabled(&self) -> bool;

    /// Check whether the current countdown cycle reached its timeout
    ///
    /// Cleared only by [`Timer::restart`].
    fn has_timed_out(&self) -> bool;

    /// Get the timeout in milliseconds
    ///
    /// Variants without a meaningful timeout report 0.
    fn timeout_ms(&self) -> u32;

    /// Set a new timeout in milliseconds
    ///
    /// A 0 ms timeout is rejected and the previous value kept.
    fn set_timeout_ms(&mut self, timeout_ms: u32);

    /// Start the countdown without clearing accumulated progress
    fn start(&mut self);

    /// Stop the countdown without clearing accumulated progress
    fn stop(&mut self);

    /// Start the timer if stopped, stop it if started
    fn toggle(&mut self) {
        if self.is_enabled() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Start a fresh countdown cycle
    ///
    /// Enables the timer, clears the timeout flag and discards accumulated
    /// ticks.
    fn restart(&mut self);

    /// Deliver one interrupt tick
    ///
    /// Called from the timer interrupt at the circuit's tick interval. Must
    /// stay O(1) and never block.
    fn handle_callback(&mut self);
}

/// Index of a physical timer circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CircuitId(pub u8);

impl CircuitId {
    /// Get the circuit index as usize (for table lookups)
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Time between two timer interrupts
///
/// Stored in microseconds so that tick math stays in integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInterval {
    micros: u32,
}

impl TickInterval {
    /// ATmega328P at 16 MHz, prescaler 8, 8-bit overflow: 0.128 ms per tick
    pub const ATMEGA328P: Self = Self::from_micros(128);

    /// Create an interval from microseconds
    ///
    /// A zero interval is bumped to 1 µs.
    pub const fn from_micros(micros: u32) -> Self {
        Self {
            micros: if micros == 0 { 1 } else { micros },
        }
    }

    /// Interval in microseconds
    pub const fn as_micros(self) -> u32 {
        self.micros
    }
}

/// Interrupt mask control for a bank of timer circuits
///
/// The only register-level operation the countdown logic needs is turning a
/// circuit's interrupt on and off. Register writes are volatile and shared,
/// so implementations take `&self`.
pub trait CircuitRegisters {
    /// Interrupt period of every circuit in this bank
    const TICK_INTERVAL: TickInterval;

    /// Enable or disable the interrupt of one circuit
    fn set_interrupt_enabled(&self, circuit: CircuitId, enabled: bool);

    /// Check whether a circuit's interrupt is enabled
    fn is_interrupt_enabled(&self, circuit: CircuitId) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flags {
        enabled: bool,
    }

    impl Timer for Flags {
        fn is_initialized(&self) -> bool {
            true
        }
        fn is_enabled(&self) -> bool {
            self.enabled
        }
        fn has_timed_out(&self) -> bool {
            false
        }
        fn timeout_ms(&self) -> u32 {
            0
        }
        fn set_timeout_ms(&mut self, _timeout_ms: u32) {}
        fn start(&mut self) {
            self.enabled = true;
        }
        fn stop(&mut self) {
            self.enabled = false;
        }
        fn restart(&mut self) {
            self.enabled = true;
        }
        fn handle_callback(&mut self) {}
    }

    #[test]
    fn test_default_toggle() {
        let mut timer = Flags { enabled: false };
        timer.toggle();
        assert!(timer.is_enabled());
        timer.toggle();
        assert!(!timer.is_enabled());
    }

    #[test]
    fn test_zero_interval_bumped() {
        assert_eq!(TickInterval::from_micros(0).as_micros(), 1);
        assert_eq!(TickInterval::ATMEGA328P.as_micros(), 128);
    }

    #[test]
    fn test_circuit_index() {
        assert_eq!(CircuitId(2).index(), 2);
    }
}
