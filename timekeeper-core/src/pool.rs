//! Timer circuit arbitration
//!
//! A microcontroller has a handful of countdown circuits (three on the
//! ATmega328P). [`CircuitPool`] is an arena of those circuits: every logical
//! timer claims one with [`CircuitPool::try_acquire`] and holds the returned
//! [`Circuit`] for its whole lifetime. Dropping the handle gives the circuit
//! back.
//!
//! The slot table is the only state shared between timers and may be touched
//! from interrupt context, so every access goes through a critical section.
//! A pool can therefore live in a `static`:
//!
//! ```ignore
//! static TIMER_CIRCUITS: CircuitPool<3> = CircuitPool::new();
//! ```

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use timekeeper_hal::timer::CircuitId;

/// Slot bookkeeping shared by every pool size
trait SlotTable {
    fn free(&self, id: CircuitId);
}

/// Fixed-capacity pool of timer circuits
pub struct CircuitPool<const N: usize> {
    /// `true` = circuit claimed
    slots: Mutex<CriticalSectionRawMutex, Cell<[bool; N]>>,
}

impl<const N: usize> CircuitPool<N> {
    const CAPACITY_OK: () = assert!(N > 0 && N <= 256, "pool capacity must be 1..=256");

    /// Create a pool with all `N` circuits free
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::CAPACITY_OK;
        Self {
            slots: Mutex::new(Cell::new([false; N])),
        }
    }

    /// Number of physical circuits
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of circuits currently claimed
    pub fn claimed(&self) -> usize {
        self.slots
            .lock(|slots| slots.get().iter().filter(|claimed| **claimed).count())
    }

    /// Number of circuits still free
    pub fn available(&self) -> usize {
        N - self.claimed()
    }

    /// Check whether a specific circuit is claimed
    pub fn is_claimed(&self, id: CircuitId) -> bool {
        self.slots
            .lock(|slots| slots.get().get(id.index()).copied().unwrap_or(false))
    }

    /// Claim the lowest free circuit
    ///
    /// Returns `None` without touching the table when every circuit is taken.
    pub fn try_acquire(&self) -> Option<Circuit<'_>> {
        let id = self.slots.lock(|cell| {
            let mut slots = cell.get();
            let index = slots.iter().position(|claimed| !claimed)?;
            slots[index] = true;
            cell.set(slots);
            Some(CircuitId(index as u8))
        });

        match id {
            Some(id) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("timer circuit {} claimed", id.0);
                Some(Circuit { id, pool: self })
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("no timer circuit available ({} in use)", N);
                None
            }
        }
    }

    /// Give a circuit back
    ///
    /// Equivalent to dropping the handle. The circuit always returns to the
    /// pool it was acquired from.
    pub fn release(&self, circuit: Circuit<'_>) {
        drop(circuit);
    }
}

impl<const N: usize> Default for CircuitPool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SlotTable for CircuitPool<N> {
    fn free(&self, id: CircuitId) {
        self.slots.lock(|cell| {
            let mut slots = cell.get();
            if let Some(slot) = slots.get_mut(id.index()) {
                *slot = false;
            }
            cell.set(slots);
        });

        #[cfg(feature = "defmt")]
        defmt::debug!("timer circuit {} released", id.0);
    }
}

/// Exclusive claim on one timer circuit
///
/// Not `Clone`: exactly one owner per circuit. The claim ends on drop.
pub struct Circuit<'a> {
    id: CircuitId,
    pool: &'a (dyn SlotTable + Sync),
}

impl Circuit<'_> {
    /// Index of the claimed circuit
    pub fn id(&self) -> CircuitId {
        self.id
    }
}

impl core::fmt::Debug for Circuit<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Circuit").field("id", &self.id).finish()
    }
}

impl Drop for Circuit<'_> {
    fn drop(&mut self) {
        self.pool.free(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_pool_is_empty() {
        let pool: CircuitPool<3> = CircuitPool::new();
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.claimed(), 0);
        assert_eq!(pool.available(), 3);
    }

    #[test]
    fn test_exhaustion() {
        let pool: CircuitPool<3> = CircuitPool::new();
        let a = pool.try_acquire();
        let b = pool.try_acquire();
        let c = pool.try_acquire();
        assert!(a.is_some() && b.is_some() && c.is_some());

        assert!(pool.try_acquire().is_none());
        assert_eq!(pool.claimed(), 3);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn test_circuits_are_distinct() {
        let pool: CircuitPool<3> = CircuitPool::new();
        let a = pool.try_acquire().unwrap();
        let b = pool.try_acquire().unwrap();
        let c = pool.try_acquire().unwrap();
        assert_eq!(a.id(), CircuitId(0));
        assert_eq!(b.id(), CircuitId(1));
        assert_eq!(c.id(), CircuitId(2));
    }

    #[test]
    fn test_drop_releases_circuit() {
        let pool: CircuitPool<2> = CircuitPool::new();
        let a = pool.try_acquire().unwrap();
        let _b = pool.try_acquire().unwrap();
        assert!(pool.try_acquire().is_none());

        drop(a);
        assert_eq!(pool.claimed(), 1);
        assert!(!pool.is_claimed(CircuitId(0)));

        // The freed slot is handed out again
        let again = pool.try_acquire().unwrap();
        assert_eq!(again.id(), CircuitId(0));
    }

    #[test]
    fn test_explicit_release() {
        let pool: CircuitPool<1> = CircuitPool::new();
        let circuit = pool.try_acquire().unwrap();
        assert!(pool.is_claimed(CircuitId(0)));

        pool.release(circuit);
        assert_eq!(pool.claimed(), 0);
        assert!(pool.try_acquire().is_some());
    }

    #[test]
    fn test_is_claimed_out_of_range() {
        let pool: CircuitPool<2> = CircuitPool::new();
        assert!(!pool.is_claimed(CircuitId(7)));
    }

    #[test]
    fn test_static_pool() {
        static POOL: CircuitPool<3> = CircuitPool::new();
        let circuit = POOL.try_acquire().unwrap();
        assert!(POOL.is_claimed(circuit.id()));
        drop(circuit);
        assert_eq!(POOL.claimed(), 0);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(requests in 0usize..20) {
            let pool: CircuitPool<4> = CircuitPool::new();
            let granted: Vec<_> = (0..requests).filter_map(|_| pool.try_acquire()).collect();

            prop_assert_eq!(granted.len(), requests.min(4));
            prop_assert_eq!(pool.claimed(), granted.len());

            drop(granted);
            prop_assert_eq!(pool.claimed(), 0);
        }
    }
}
