//! Timekeeper Hardware Abstraction Layer
//!
//! This crate defines the contracts shared by every timer variant and the
//! peripherals they lean on. Chip-specific code implements the register
//! traits; application code only ever talks to [`timer::Timer`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (console, blinker, ...)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  timekeeper-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ HardwareTimer │       │   StubTimer   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`timer::Timer`] - Countdown timer capability
//! - [`timer::CircuitRegisters`] - Interrupt mask control for timer circuits
//! - [`tempsensor::TemperatureSensor`] - Temperature readout
//! - [`storage::Storage`] - Persisted settings

#![no_std]
#![deny(unsafe_code)]

pub mod storage;
pub mod tempsensor;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use storage::{Storage, StorageError, StorageKey};
pub use tempsensor::TemperatureSensor;
pub use timer::{CircuitId, CircuitRegisters, Timer};
