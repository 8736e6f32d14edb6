//! Temperature sensor stub
//!
//! Always initialized; reports whatever temperature the test put in.

use timekeeper_hal::TemperatureSensor;

/// Temperature sensor stub
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StubSensor {
    temp_c: i16,
}

impl StubSensor {
    /// Create a stub reading 0 °C
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stub reading `temp_c`
    pub fn with_temperature(temp_c: i16) -> Self {
        Self { temp_c }
    }

    /// Set the temperature returned by subsequent reads
    pub fn set_temperature(&mut self, temp_c: i16) {
        self.temp_c = temp_c;
    }
}

impl TemperatureSensor for StubSensor {
    fn is_initialized(&self) -> bool {
        true
    }

    fn read(&self) -> i16 {
        self.temp_c
    }
}
