//! trainhub Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the control core calls into.
//! Chip-specific crates implement them for real hardware; the core's tests
//! implement them with in-memory doubles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  trainhub-core (control loop)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  trainhub-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ trainhub-hal-   │
//!            │    rp2040       │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`actuator::MotorOutput`], [`actuator::LightOutput`], [`actuator::StatusLight`] - Outputs
//! - [`gpio::Button`], [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//! - [`storage::ByteStorage`] - Byte-addressed non-volatile storage
//! - [`remote::RemoteAcquirer`], [`remote::RemoteHandle`] - Wireless remote
//! - [`power::PowerControl`], [`power::SystemInfo`] - Power and identification
//! - [`time::Clock`] - Monotonic millisecond clock

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
pub mod gpio;
pub mod power;
pub mod remote;
pub mod storage;
pub mod time;

// Re-export key traits at crate root for convenience
pub use actuator::{Color, LightOutput, MotorOutput, StatusLight};
pub use gpio::{Button, InputPin, OutputPin, PushButton};
pub use power::{PowerControl, ResetReason, SystemInfo};
pub use remote::{ButtonSet, RemoteAcquirer, RemoteButton, RemoteError, RemoteHandle};
pub use storage::{ByteStorage, StorageError};
pub use time::Clock;
