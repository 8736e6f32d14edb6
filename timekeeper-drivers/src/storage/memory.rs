//! RAM-backed settings store
//!
//! Behaves like a freshly erased EEPROM: every key starts missing. Values are
//! lost on reset, so this is for host tests and boards without EEPROM.

use heapless::Vec;
use timekeeper_hal::{Storage, StorageError, StorageKey};

/// Maximum value size per key
pub const MAX_VALUE_LEN: usize = 8;

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: [Option<Vec<u8, MAX_VALUE_LEN>>; StorageKey::COUNT],
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget a stored value
    pub fn remove(&mut self, key: StorageKey) {
        self.values[key.as_u8() as usize] = None;
    }
}

impl Storage for MemoryStorage {
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let value = self.values[key.as_u8() as usize]
            .as_ref()
            .ok_or(StorageError::NotFound)?;
        let dest = buffer
            .get_mut(..value.len())
            .ok_or(StorageError::BufferTooSmall)?;
        dest.copy_from_slice(value);
        Ok(value.len())
    }

    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
        let value = Vec::from_slice(data).map_err(|_| StorageError::Full)?;
        self.values[key.as_u8() as usize] = Some(value);
        Ok(())
    }
}
