//! Timer implementations
//!
//! - [`HardwareTimer`]: owns one circuit from a [`CircuitPool`] and counts
//!   interrupt ticks
//! - [`StubTimer`]: no circuit, no ticking; for testing timer consumers
//!
//! [`CircuitPool`]: timekeeper_core::CircuitPool

pub mod hardware;
pub mod stub;

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use timekeeper_hal::Timer;

pub use hardware::HardwareTimer;
pub use stub::StubTimer;

/// Timer shared between foreground code and its interrupt handler
///
/// Every access runs inside a critical section, so the tick count and the
/// timeout flag are never observed half-updated.
pub type SharedTimer<T> = Mutex<CriticalSectionRawMutex, RefCell<T>>;

/// Deliver one tick to a shared timer
///
/// Meant to be called from the circuit's interrupt vector. If the timer is
/// already borrowed (a callback re-entering its own timer) the tick is
/// dropped.
pub fn deliver_tick<T: Timer>(shared: &SharedTimer<T>) {
    shared.lock(|timer| {
        if let Ok(mut timer) = timer.try_borrow_mut() {
            timer.handle_callback();
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("tick dropped: timer busy");
        }
    });
}

/// Run `f` on a shared timer from foreground code
///
/// Returns `None` if the timer is already borrowed.
pub fn with_timer<T, U>(shared: &SharedTimer<T>, f: impl FnOnce(&mut T) -> U) -> Option<U> {
    shared.lock(|timer| timer.try_borrow_mut().ok().map(|mut timer| f(&mut timer)))
}
