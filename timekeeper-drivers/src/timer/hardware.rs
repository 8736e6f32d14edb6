//! Circuit-backed countdown timer
//!
//! A [`HardwareTimer`] claims one circuit from a [`CircuitPool`] when it is
//! created and keeps it until it is dropped. The circuit's interrupt calls
//! [`Timer::handle_callback`] once per tick; after the configured number of
//! ticks the timer flags a timeout and runs its callback.
//!
//! If no circuit is free, or the timeout is 0 ms, the timer is created
//! uninitialized and stays that way. Every operation on it is a no-op and
//! [`HardwareTimer::init_error`] tells why.
//!
//! The circuit's interrupt mask bit follows [`Timer::is_enabled`]: it is set
//! on start/restart, cleared on stop, and cleared when the timer is dropped.

use timekeeper_core::{Circuit, CircuitPool, Countdown, TimerConfig, TimerError};
use timekeeper_hal::{CircuitId, CircuitRegisters, Timer};

/// Circuit claim plus countdown of an initialized timer
struct Active<'p> {
    circuit: Circuit<'p>,
    countdown: Countdown,
}

/// Countdown timer backed by a physical timer circuit
///
/// `F` is the timeout callback. It runs inside [`Timer::handle_callback`],
/// usually in interrupt context, so it must not block or allocate.
pub struct HardwareTimer<'p, R: CircuitRegisters, F = fn()> {
    state: Result<Active<'p>, TimerError>,
    registers: &'p R,
    callback: Option<F>,
}

impl<'p, R: CircuitRegisters> HardwareTimer<'p, R, fn()> {
    /// Create a stopped timer without a callback
    pub fn new<const N: usize>(pool: &'p CircuitPool<N>, registers: &'p R, timeout_ms: u32) -> Self {
        Self::build(pool, registers, TimerConfig::new(timeout_ms), None)
    }

    /// Create a timer from a stored configuration
    ///
    /// An invalid configuration leaves the timer uninitialized, even when
    /// `start_enabled` is set.
    pub fn from_config<const N: usize>(
        pool: &'p CircuitPool<N>,
        registers: &'p R,
        config: TimerConfig,
    ) -> Self {
        Self::build(pool, registers, config, None)
    }
}

impl<'p, R: CircuitRegisters, F: FnMut()> HardwareTimer<'p, R, F> {
    /// Create a stopped timer that runs `callback` on timeout
    pub fn with_callback<const N: usize>(
        pool: &'p CircuitPool<N>,
        registers: &'p R,
        timeout_ms: u32,
        callback: F,
    ) -> Self {
        Self::build(pool, registers, TimerConfig::new(timeout_ms), Some(callback))
    }

    fn build<const N: usize>(
        pool: &'p CircuitPool<N>,
        registers: &'p R,
        config: TimerConfig,
        callback: Option<F>,
    ) -> Self {
        let state = Self::claim(pool, config);

        match &state {
            Ok(active) => {
                registers.set_interrupt_enabled(active.circuit.id(), active.countdown.is_enabled())
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("timer ({} ms) left uninitialized: {}", config.timeout_ms, _e);
            }
        }

        Self {
            state,
            registers,
            callback,
        }
    }

    fn claim<const N: usize>(
        pool: &'p CircuitPool<N>,
        config: TimerConfig,
    ) -> Result<Active<'p>, TimerError> {
        // Validated first so an invalid timer never holds a circuit
        let countdown = Countdown::from_config(config, R::TICK_INTERVAL)?;
        let circuit = pool.try_acquire().ok_or(TimerError::ResourceExhausted)?;

        Ok(Active { circuit, countdown })
    }
}

impl<R: CircuitRegisters, F> HardwareTimer<'_, R, F> {
    /// Why the timer is uninitialized, if it is
    pub fn init_error(&self) -> Option<TimerError> {
        self.state.as_ref().err().copied()
    }

    /// Circuit owned by this timer
    pub fn circuit_id(&self) -> Option<CircuitId> {
        self.state.as_ref().ok().map(|active| active.circuit.id())
    }

    /// Ticks counted in the current cycle
    pub fn ticks(&self) -> u32 {
        self.countdown().map_or(0, Countdown::ticks)
    }

    /// Ticks needed to time out (0 if uninitialized)
    pub fn tick_threshold(&self) -> u32 {
        self.countdown().map_or(0, Countdown::threshold)
    }

    fn countdown(&self) -> Option<&Countdown> {
        self.state.as_ref().ok().map(|active| &active.countdown)
    }

    /// Apply `f` to the countdown and mirror its enable state into the
    /// interrupt mask. No-op when uninitialized.
    fn update(&mut self, f: impl FnOnce(&mut Countdown)) {
        if let Ok(active) = &mut self.state {
            f(&mut active.countdown);
            self.registers
                .set_interrupt_enabled(active.circuit.id(), active.countdown.is_enabled());
        }
    }
}

impl<R: CircuitRegisters, F: FnMut()> Timer for HardwareTimer<'_, R, F> {
    fn is_initialized(&self) -> bool {
        self.state.is_ok()
    }

    fn is_enabled(&self) -> bool {
        self.countdown().is_some_and(Countdown::is_enabled)
    }

    fn has_timed_out(&self) -> bool {
        self.countdown().is_some_and(Countdown::has_timed_out)
    }

    fn timeout_ms(&self) -> u32 {
        self.countdown().map_or(0, Countdown::timeout_ms)
    }

    fn set_timeout_ms(&mut self, timeout_ms: u32) {
        if let Ok(active) = &mut self.state {
            active.countdown.set_timeout_ms(timeout_ms);
        }
    }

    fn start(&mut self) {
        self.update(Countdown::start);
    }

    fn stop(&mut self) {
        self.update(Countdown::stop);
    }

    fn toggle(&mut self) {
        self.update(Countdown::toggle);
    }

    fn restart(&mut self) {
        self.update(Countdown::restart);
    }

    fn handle_callback(&mut self) {
        let fired = match &mut self.state {
            Ok(active) => active.countdown.tick(),
            Err(_) => false,
        };

        if fired {
            if let Some(callback) = self.callback.as_mut() {
                callback();
            }
        }
    }
}

impl<R: CircuitRegisters, F> Drop for HardwareTimer<'_, R, F> {
    fn drop(&mut self) {
        // The circuit itself goes back to the pool when `Active` drops
        if let Ok(active) = &self.state {
            self.registers
                .set_interrupt_enabled(active.circuit.id(), false);
        }
    }
}
