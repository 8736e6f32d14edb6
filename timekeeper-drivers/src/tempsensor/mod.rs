//! Temperature sensor implementations

pub mod stub;

pub use stub::StubSensor;
