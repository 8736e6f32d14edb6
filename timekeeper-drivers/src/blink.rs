//! LED blinker
//!
//! Toggles an output pin every time a timer times out, then restarts the
//! timer for the next half period. The timer does the counting (usually from
//! its interrupt); [`Blinker::poll`] is called from the main loop.

use embedded_hal::digital::OutputPin;
use timekeeper_hal::Timer;

/// LED driven by a countdown timer
pub struct Blinker<P, T> {
    pin: P,
    timer: T,
    /// Current logical LED state (true = on)
    lit: bool,
}

impl<P: OutputPin, T: Timer> Blinker<P, T> {
    /// Create a stopped blinker with the LED off
    pub fn new(mut pin: P, timer: T) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self {
            pin,
            timer,
            lit: false,
        })
    }

    /// Start blinking from a fresh timer cycle
    pub fn start(&mut self) {
        self.timer.restart();
    }

    /// Stop blinking and turn the LED off
    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.timer.stop();
        self.set_lit(false)
    }

    /// Start if stopped, stop if running
    pub fn toggle(&mut self) -> Result<(), P::Error> {
        if self.timer.is_enabled() {
            self.stop()
        } else {
            self.start();
            Ok(())
        }
    }

    /// Toggle the LED if the timer has timed out
    ///
    /// Returns whether the LED changed.
    pub fn poll(&mut self) -> Result<bool, P::Error> {
        if !self.timer.is_enabled() || !self.timer.has_timed_out() {
            return Ok(false);
        }
        self.set_lit(!self.lit)?;
        self.timer.restart();
        Ok(true)
    }

    fn set_lit(&mut self, lit: bool) -> Result<(), P::Error> {
        if lit {
            self.pin.set_high()?;
        } else {
            self.pin.set_low()?;
        }
        self.lit = lit;
        Ok(())
    }

    /// Check if the LED is on
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// Check if the blinker is running
    pub fn is_running(&self) -> bool {
        self.timer.is_enabled()
    }

    /// Get the timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Get the timer mutably (for tick delivery)
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Take the pin and timer back
    pub fn release(self) -> (P, T) {
        (self.pin, self.timer)
    }
}
