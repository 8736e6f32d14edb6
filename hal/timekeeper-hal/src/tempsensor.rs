//! Temperature sensor abstraction
//!
//! The timer application reports a temperature over its serial console.
//! Only the reading contract lives here.

/// Temperature sensor
pub trait TemperatureSensor {
    /// Check if the sensor is initialized
    fn is_initialized(&self) -> bool;

    /// Read the temperature in whole degrees Celsius
    fn read(&self) -> i16;
}
