//! Actuator settings and their persistence
//!
//! Settings are the operator's last intent for the motor and the light.
//! They are loaded once at startup and written back when the motor is
//! switched off, touching only the bytes that actually changed.

pub mod codec;
pub mod store;

pub use codec::{decode_brightness, decode_speed, encode_brightness, encode_speed};
pub use store::{SaveOutcome, SettingsStore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest motor speed (full reverse)
pub const SPEED_MIN: i8 = -100;
/// Highest motor speed (full forward)
pub const SPEED_MAX: i8 = 100;
/// Highest light level
pub const BRIGHTNESS_MAX: u8 = 100;

/// Speed used on first boot or when the stored byte is corrupt
pub const DEFAULT_SPEED: i8 = -50;
/// Brightness used on first boot or when the stored byte is corrupt
pub const DEFAULT_BRIGHTNESS: u8 = 50;

/// Motor speed and light brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Motor speed in `-100..=100`
    pub speed: i8,
    /// Light level in `0..=100`
    pub brightness: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl Settings {
    /// Build settings, clamping both fields into range
    pub fn new(speed: i8, brightness: u8) -> Self {
        Self {
            speed: speed.clamp(SPEED_MIN, SPEED_MAX),
            brightness: brightness.min(BRIGHTNESS_MAX),
        }
    }
}
