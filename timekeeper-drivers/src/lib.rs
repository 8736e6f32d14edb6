//! Timer and sensor implementations
//!
//! This crate provides concrete implementations of the traits defined in
//! timekeeper-hal:
//!
//! - Circuit-backed countdown timer and its test stub
//! - Temperature sensor stub
//! - RAM-backed settings store
//! - LED blinker driven by any timer

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod blink;
pub mod storage;
pub mod tempsensor;
pub mod timer;
