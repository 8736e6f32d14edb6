//! Persistent storage abstractions
//!
//! Small key-value store for settings that must survive a reset, backed by
//! EEPROM or a flash page on the target chip.

/// Storage keys for persisted settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Toggle timer enabled flag (one byte, 0 or 1)
    ToggleTimerEnabled = 0,
    /// Reserved for future use
    Reserved1 = 1,
}

impl StorageKey {
    /// Number of keys
    pub const COUNT: usize = 2;

    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::ToggleTimerEnabled),
            1 => Some(StorageKey::Reserved1),
            _ => None,
        }
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Hardware write or read failed
    Device,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Persistent key-value storage
///
/// EEPROM writes on small MCUs are blocking byte writes, so the trait is
/// synchronous.
pub trait Storage {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or an error.
    fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value by key
    fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: StorageKey) -> bool {
        let mut empty = [0u8; 0];
        !matches!(self.read(key, &mut empty), Err(StorageError::NotFound))
    }
}
