//! Actuator output abstractions
//!
//! The hub drives one bidirectional motor and one dimmable light. Both
//! take percentage values; implementations map them onto PWM duty cycles
//! or whatever the output stage needs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motor output stage
pub trait MotorOutput {
    /// Drive the motor at `value` percent of full power
    ///
    /// `value` is in `-100..=100`; the sign selects the direction and 0
    /// means no output. Idempotent.
    fn set_output(&mut self, value: i8);
}

/// Dimmable light output stage
pub trait LightOutput {
    /// Set the light level in percent (`0..=100`)
    fn set_level(&mut self, level: u8);
}

/// Indicator colours shared by the hub status light and the remote's light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Color {
    /// Light off
    Off = 0,
    #[default]
    Green = 1,
    Red = 2,
    Blue = 3,
    Yellow = 4,
    White = 5,
}

impl Color {
    /// Get the colour as its wire byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a colour from its wire byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Color::Off),
            1 => Some(Color::Green),
            2 => Some(Color::Red),
            3 => Some(Color::Blue),
            4 => Some(Color::Yellow),
            5 => Some(Color::White),
            _ => None,
        }
    }

    /// Parse a lowercase colour name as used in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(Color::Off),
            "green" => Some(Color::Green),
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "yellow" => Some(Color::Yellow),
            "white" => Some(Color::White),
            _ => None,
        }
    }
}

/// The hub's own status light
///
/// Single-colour boards may treat every colour other than [`Color::Off`]
/// as "on".
pub trait StatusLight {
    /// Show the given colour
    fn set_color(&mut self, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_byte_mapping() {
        for color in [
            Color::Off,
            Color::Green,
            Color::Red,
            Color::Blue,
            Color::Yellow,
            Color::White,
        ] {
            assert_eq!(Color::from_u8(color.as_u8()), Some(color));
        }
        assert_eq!(Color::from_u8(6), None);
    }

    #[test]
    fn test_color_names() {
        assert_eq!(Color::from_name("green"), Some(Color::Green));
        assert_eq!(Color::from_name("off"), Some(Color::Off));
        assert_eq!(Color::from_name("Green"), None);
        assert_eq!(Color::from_name("purple"), None);
    }
}
