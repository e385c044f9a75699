//! Board-agnostic control core of the battery hub
//!
//! The hub drives one motor and one light, takes input from a single push
//! button and an optional wireless remote, and keeps the last-used speed and
//! brightness in non-volatile storage. This crate holds everything that does
//! not depend on a particular board:
//!
//! - Settings persistence with write avoidance
//! - Push-button press classification
//! - Remote connection lifecycle and button translation
//! - The cooperative control loop tying them together
//! - Configuration types and their TOML parser
//!
//! All hardware is reached through the traits of `trainhub-hal`.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod error;
pub mod input;
pub mod remote;
pub mod settings;

#[cfg(test)]
mod testing;

pub use config::{ControlConfig, StopBehavior};
pub use control::{ControlLoop, Halt, Step, TickReport};
pub use error::Error;
pub use settings::{Settings, SettingsStore};
