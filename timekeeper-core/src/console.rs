//! Serial console commands
//!
//! The target application is driven over UART with single-byte commands:
//!
//! | Byte | Command            | Reply                                  |
//! |------|--------------------|----------------------------------------|
//! | `t`  | Toggle timer       | `Toggle timer enabled` / `... disabled`|
//! | `s`  | Report timer state | `Toggle timer enabled` / `... disabled`|
//! | `r`  | Read temperature   | `Temperature: 23 C`                    |
//!
//! Every toggle is saved under [`StorageKey::ToggleTimerEnabled`], and
//! [`Console::restore`] brings the timer back in that state after a reset.
//!
//! Bytes are case-insensitive. Line endings and other whitespace sent by
//! terminal programs are reported as [`ConsoleError::Ignored`] so the caller
//! can skip them silently.

use core::fmt::{self, Write};

use heapless::String;
use timekeeper_hal::{Storage, StorageError, StorageKey, TemperatureSensor, Timer};

/// Maximum reply length (without line ending)
pub const MAX_REPLY_LEN: usize = 32;

/// Reply line sent back over the console
pub type Reply = String<MAX_REPLY_LEN>;

/// Console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Toggle the toggle timer
    Toggle,
    /// Report whether the toggle timer is enabled
    Status,
    /// Read the temperature sensor
    ReadTemperature,
}

impl Command {
    /// Parse a command byte
    pub fn from_byte(byte: u8) -> Result<Self, ConsoleError> {
        match byte.to_ascii_lowercase() {
            b't' => Ok(Command::Toggle),
            b's' => Ok(Command::Status),
            b'r' => Ok(Command::ReadTemperature),
            b if b.is_ascii_whitespace() => Err(ConsoleError::Ignored),
            b => Err(ConsoleError::UnknownCommand(b)),
        }
    }

    /// Get the command byte
    pub fn as_byte(self) -> u8 {
        match self {
            Command::Toggle => b't',
            Command::Status => b's',
            Command::ReadTemperature => b'r',
        }
    }
}

/// Console errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Whitespace or line ending, nothing to do
    Ignored,
    /// Byte is not a known command
    UnknownCommand(u8),
    /// The toggle timer never got a circuit
    TimerUnavailable,
    /// The temperature sensor is not initialized
    SensorUnavailable,
    /// Reply did not fit into [`MAX_REPLY_LEN`]
    ReplyTooLong,
    /// Saving the toggle timer state failed
    Storage(StorageError),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleError::Ignored => Ok(()),
            ConsoleError::UnknownCommand(b) => write!(f, "Unknown command: 0x{:02x}", b),
            ConsoleError::TimerUnavailable => f.write_str("Toggle timer unavailable"),
            ConsoleError::SensorUnavailable => f.write_str("Temperature sensor unavailable"),
            ConsoleError::ReplyTooLong => f.write_str("Reply too long"),
            ConsoleError::Storage(e) => write!(f, "Saving toggle state failed: {:?}", e),
        }
    }
}

/// Command handler owning the toggle timer, the temperature sensor and the
/// settings store
pub struct Console<T, S, M> {
    timer: T,
    sensor: S,
    storage: M,
}

impl<T: Timer, S: TemperatureSensor, M: Storage> Console<T, S, M> {
    /// Create a console, leaving the timer as it is
    pub fn new(timer: T, sensor: S, storage: M) -> Self {
        Self {
            timer,
            sensor,
            storage,
        }
    }

    /// Create a console after a reset
    ///
    /// Starts the toggle timer if it was enabled when its state was last
    /// saved. A missing or unreadable entry leaves the timer stopped.
    pub fn restore(mut timer: T, sensor: S, mut storage: M) -> Self {
        if load_toggle_enabled(&mut storage) == Some(true) {
            timer.start();
        }
        Self::new(timer, sensor, storage)
    }

    /// Parse and execute one received byte
    pub fn handle_byte(&mut self, byte: u8) -> Result<Reply, ConsoleError> {
        let command = Command::from_byte(byte)?;
        self.handle(command)
    }

    /// Execute a command and build its reply
    pub fn handle(&mut self, command: Command) -> Result<Reply, ConsoleError> {
        let mut reply = Reply::new();

        match command {
            Command::Toggle => {
                if !self.timer.is_initialized() {
                    return Err(ConsoleError::TimerUnavailable);
                }
                self.timer.toggle();
                self.save_toggle_enabled()?;
                self.write_timer_state(&mut reply)?;
            }
            Command::Status => {
                if !self.timer.is_initialized() {
                    return Err(ConsoleError::TimerUnavailable);
                }
                self.write_timer_state(&mut reply)?;
            }
            Command::ReadTemperature => {
                if !self.sensor.is_initialized() {
                    return Err(ConsoleError::SensorUnavailable);
                }
                write!(reply, "Temperature: {} C", self.sensor.read())
                    .map_err(|_| ConsoleError::ReplyTooLong)?;
            }
        }

        Ok(reply)
    }

    fn save_toggle_enabled(&mut self) -> Result<(), ConsoleError> {
        let value = [u8::from(self.timer.is_enabled())];
        self.storage
            .write(StorageKey::ToggleTimerEnabled, &value)
            .map_err(ConsoleError::Storage)
    }

    fn write_timer_state(&self, reply: &mut Reply) -> Result<(), ConsoleError> {
        let state = if self.timer.is_enabled() {
            "enabled"
        } else {
            "disabled"
        };
        write!(reply, "Toggle timer {}", state).map_err(|_| ConsoleError::ReplyTooLong)
    }

    /// Get the toggle timer
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Take the timer, sensor and store back
    pub fn into_parts(self) -> (T, S, M) {
        (self.timer, self.sensor, self.storage)
    }
}

/// Read the saved toggle timer state
fn load_toggle_enabled<M: Storage>(storage: &mut M) -> Option<bool> {
    let mut buffer = [0u8; 1];
    match storage.read(StorageKey::ToggleTimerEnabled, &mut buffer) {
        Ok(1) => match buffer[0] {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        },
        Ok(_) | Err(StorageError::NotFound) => None,
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("toggle timer state unreadable: {}", _e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal timer double; the full stub lives in timekeeper-drivers
    struct FlagTimer {
        initialized: bool,
        enabled: bool,
    }

    impl Timer for FlagTimer {
        fn is_initialized(&self) -> bool {
            self.initialized
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
            if self.initialized {
                self.enabled = true;
            }
        }
        fn stop(&mut self) {
            if self.initialized {
                self.enabled = false;
            }
        }
        fn restart(&mut self) {
            self.start();
        }
        fn handle_callback(&mut self) {}
    }

    struct FixedSensor(Option<i16>);

    impl TemperatureSensor for FixedSensor {
        fn is_initialized(&self) -> bool {
            self.0.is_some()
        }
        fn read(&self) -> i16 {
            self.0.unwrap_or(0)
        }
    }

    /// One-byte-per-key EEPROM double
    #[derive(Default)]
    struct MockEeprom {
        cells: [Option<u8>; StorageKey::COUNT],
        fail_writes: bool,
    }

    impl Storage for MockEeprom {
        fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StorageError> {
            let value = self.cells[key.as_u8() as usize].ok_or(StorageError::NotFound)?;
            let slot = buffer.first_mut().ok_or(StorageError::BufferTooSmall)?;
            *slot = value;
            Ok(1)
        }

        fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::Device);
            }
            let value = *data.first().ok_or(StorageError::Corrupted)?;
            self.cells[key.as_u8() as usize] = Some(value);
            Ok(())
        }
    }

    fn timer(initialized: bool) -> FlagTimer {
        FlagTimer {
            initialized,
            enabled: false,
        }
    }

    fn console(initialized: bool, temp: Option<i16>) -> Console<FlagTimer, FixedSensor, MockEeprom> {
        Console::new(timer(initialized), FixedSensor(temp), MockEeprom::default())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::from_byte(b't'), Ok(Command::Toggle));
        assert_eq!(Command::from_byte(b'S'), Ok(Command::Status));
        assert_eq!(Command::from_byte(b'r'), Ok(Command::ReadTemperature));
        assert_eq!(Command::from_byte(b'\n'), Err(ConsoleError::Ignored));
        assert_eq!(
            Command::from_byte(b'x'),
            Err(ConsoleError::UnknownCommand(b'x'))
        );
    }

    #[test]
    fn test_command_byte_roundtrip() {
        for command in [Command::Toggle, Command::Status, Command::ReadTemperature] {
            assert_eq!(Command::from_byte(command.as_byte()), Ok(command));
        }
    }

    #[test]
    fn test_toggle_and_status() {
        let mut console = console(true, Some(21));

        assert_eq!(console.handle_byte(b's').unwrap(), "Toggle timer disabled");
        assert_eq!(console.handle_byte(b't').unwrap(), "Toggle timer enabled");
        assert!(console.timer().is_enabled());
        assert_eq!(console.handle_byte(b's').unwrap(), "Toggle timer enabled");
        assert_eq!(console.handle_byte(b't').unwrap(), "Toggle timer disabled");
    }

    #[test]
    fn test_temperature() {
        let mut console = console(true, Some(-4));
        assert_eq!(console.handle_byte(b'r').unwrap(), "Temperature: -4 C");
    }

    #[test]
    fn test_unavailable_collaborators() {
        let mut console = console(false, None);
        assert_eq!(
            console.handle(Command::Toggle),
            Err(ConsoleError::TimerUnavailable)
        );
        assert_eq!(
            console.handle(Command::ReadTemperature),
            Err(ConsoleError::SensorUnavailable)
        );
        assert!(!console.timer().is_enabled());
    }

    #[test]
    fn test_toggle_saves_state() {
        let mut console = console(true, None);

        console.handle_byte(b't').unwrap();
        let (_, _, mut eeprom) = console.into_parts();
        assert_eq!(eeprom.cells[0], Some(1));
        assert!(eeprom.exists(StorageKey::ToggleTimerEnabled));
        assert!(!eeprom.exists(StorageKey::Reserved1));
    }

    #[test]
    fn test_restore_after_reset() {
        let mut console = console(true, None);
        console.handle_byte(b't').unwrap();

        // Reset: fresh timer, same EEPROM
        let (_, sensor, eeprom) = console.into_parts();
        let mut console = Console::restore(timer(true), sensor, eeprom);
        assert!(console.timer().is_enabled());
        assert_eq!(console.handle_byte(b's').unwrap(), "Toggle timer enabled");

        console.handle_byte(b't').unwrap();
        let (_, sensor, eeprom) = console.into_parts();
        let console = Console::restore(timer(true), sensor, eeprom);
        assert!(!console.timer().is_enabled());
    }

    #[test]
    fn test_restore_without_saved_state() {
        let console = Console::restore(timer(true), FixedSensor(None), MockEeprom::default());
        assert!(!console.timer().is_enabled());
    }

    #[test]
    fn test_restore_ignores_corrupted_state() {
        let mut eeprom = MockEeprom::default();
        eeprom.cells[0] = Some(0xff);

        let console = Console::restore(timer(true), FixedSensor(None), eeprom);
        assert!(!console.timer().is_enabled());
    }

    #[test]
    fn test_failed_save_is_reported() {
        let mut console = Console::new(
            timer(true),
            FixedSensor(None),
            MockEeprom {
                fail_writes: true,
                ..MockEeprom::default()
            },
        );

        assert_eq!(
            console.handle_byte(b't'),
            Err(ConsoleError::Storage(StorageError::Device))
        );
        // The toggle itself still happened
        assert!(console.timer().is_enabled());
    }

    #[test]
    fn test_error_lines() {
        let mut line = String::<48>::new();
        write!(line, "{}", ConsoleError::UnknownCommand(b'x')).unwrap();
        assert_eq!(line, "Unknown command: 0x78");
    }
}
