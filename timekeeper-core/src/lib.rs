//! Board-agnostic core logic for countdown timers
//!
//! This crate contains everything that does not touch registers:
//!
//! - Circuit pool arbitration (fixed number of hardware timer circuits)
//! - Countdown state machine and tick math
//! - Timer configuration types
//! - Serial console command handling

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod console;
pub mod countdown;
pub mod error;
pub mod pool;

pub use config::{TickInterval, TimerConfig};
pub use countdown::{tick_threshold, Countdown};
pub use error::TimerError;
pub use pool::{Circuit, CircuitPool};
