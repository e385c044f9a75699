//! Byte encoding of the persisted settings
//!
//! ```text
//! offset 0: speed + 100   (0..=200, anything above decodes to -50)
//! offset 1: brightness    (0..=100, anything above decodes to 50)
//! ```
//!
//! Decoding is total so blank (`0xFF`) or corrupted storage yields the
//! defaults instead of an error.

use super::{Settings, BRIGHTNESS_MAX, DEFAULT_BRIGHTNESS, DEFAULT_SPEED, SPEED_MAX, SPEED_MIN};

/// Storage offset of the speed byte
pub const SPEED_OFFSET: u16 = 0;
/// Storage offset of the brightness byte
pub const BRIGHTNESS_OFFSET: u16 = 1;
/// Number of bytes the settings occupy
pub const ENCODED_LEN: usize = 2;

const SPEED_BIAS: i16 = 100;

pub fn encode_speed(speed: i8) -> u8 {
    (speed.clamp(SPEED_MIN, SPEED_MAX) as i16 + SPEED_BIAS) as u8
}

pub fn decode_speed(byte: u8) -> i8 {
    if byte as i16 <= SPEED_MAX as i16 + SPEED_BIAS {
        (byte as i16 - SPEED_BIAS) as i8
    } else {
        DEFAULT_SPEED
    }
}

pub fn encode_brightness(brightness: u8) -> u8 {
    brightness.min(BRIGHTNESS_MAX)
}

pub fn decode_brightness(byte: u8) -> u8 {
    if byte <= BRIGHTNESS_MAX {
        byte
    } else {
        DEFAULT_BRIGHTNESS
    }
}

impl Settings {
    /// Encode as the stored byte pair
    pub fn encode(&self) -> [u8; ENCODED_LEN] {
        [encode_speed(self.speed), encode_brightness(self.brightness)]
    }

    /// Decode a stored byte pair
    pub fn decode(bytes: [u8; ENCODED_LEN]) -> Self {
        Self {
            speed: decode_speed(bytes[0]),
            brightness: decode_brightness(bytes[1]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_speed_bounds() {
        assert_eq!(decode_speed(0), -100);
        assert_eq!(decode_speed(100), 0);
        assert_eq!(decode_speed(200), 100);
        assert_eq!(decode_speed(201), -50);
        assert_eq!(decode_speed(0xFF), -50);
    }

    #[test]
    fn test_brightness_bounds() {
        assert_eq!(decode_brightness(0), 0);
        assert_eq!(decode_brightness(100), 100);
        assert_eq!(decode_brightness(101), 50);
        assert_eq!(decode_brightness(0xFF), 50);
    }

    #[test]
    fn test_blank_storage_gives_defaults() {
        assert_eq!(Settings::decode([0xFF, 0xFF]), Settings::default());
    }

    proptest! {
        #[test]
        fn speed_decode_is_total(b in any::<u8>()) {
            let s = decode_speed(b);
            prop_assert!((SPEED_MIN..=SPEED_MAX).contains(&s));
            if b <= 200 {
                prop_assert_eq!(s as i16, b as i16 - 100);
            } else {
                prop_assert_eq!(s, DEFAULT_SPEED);
            }
        }

        #[test]
        fn brightness_decode_is_total(c in any::<u8>()) {
            let b = decode_brightness(c);
            prop_assert!(b <= BRIGHTNESS_MAX);
            prop_assert_eq!(b, if c <= 100 { c } else { DEFAULT_BRIGHTNESS });
        }

        #[test]
        fn in_range_settings_survive_encoding(speed in -100i8..=100, brightness in 0u8..=100) {
            let s = Settings { speed, brightness };
            prop_assert_eq!(Settings::decode(s.encode()), s);
        }
    }
}
