//! Remote button translation
//!
//! The left cluster adjusts speed, the right cluster brightness. On each
//! axis the operations apply in a fixed order (plus, minus, reset) and the
//! value is clamped after every one of them, so holding plus and minus
//! together at the upper bound ends one step below it.

use trainhub_hal::{ButtonSet, RemoteButton};

use crate::config::DEFAULT_STEP;
use crate::settings::{Settings, BRIGHTNESS_MAX, SPEED_MAX, SPEED_MIN};

/// Maps held remote buttons onto proposed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputTranslator {
    step: u8,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_STEP)
    }
}

struct Axis {
    plus: RemoteButton,
    minus: RemoteButton,
    reset: RemoteButton,
    min: i16,
    max: i16,
}

const SPEED_AXIS: Axis = Axis {
    plus: RemoteButton::LeftPlus,
    minus: RemoteButton::LeftMinus,
    reset: RemoteButton::Left,
    min: SPEED_MIN as i16,
    max: SPEED_MAX as i16,
};

const BRIGHTNESS_AXIS: Axis = Axis {
    plus: RemoteButton::RightPlus,
    minus: RemoteButton::RightMinus,
    reset: RemoteButton::Right,
    min: 0,
    max: BRIGHTNESS_MAX as i16,
};

impl Axis {
    fn apply(&self, pressed: ButtonSet, value: i16, step: i16) -> i16 {
        let mut v = value;
        if pressed.contains(self.plus) {
            v = (v + step).clamp(self.min, self.max);
        }
        if pressed.contains(self.minus) {
            v = (v - step).clamp(self.min, self.max);
        }
        if pressed.contains(self.reset) {
            v = 0i16.clamp(self.min, self.max);
        }
        v
    }
}

impl InputTranslator {
    pub fn new(step: u8) -> Self {
        Self { step }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Propose new settings for the held `pressed` buttons
    ///
    /// Pure; an empty set returns `current` unchanged.
    pub fn translate(&self, pressed: ButtonSet, current: Settings) -> Settings {
        if pressed.is_empty() {
            return current;
        }
        let step = i16::from(self.step);
        Settings {
            speed: SPEED_AXIS.apply(pressed, i16::from(current.speed), step) as i8,
            brightness: BRIGHTNESS_AXIS.apply(pressed, i16::from(current.brightness), step) as u8,
        }
    }
}

/// Translate with the default step
pub fn translate(pressed: ButtonSet, current: Settings) -> Settings {
    InputTranslator::default().translate(pressed, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use trainhub_hal::RemoteButton::*;

    fn set(buttons: &[RemoteButton]) -> ButtonSet {
        ButtonSet::from_buttons(buttons)
    }

    #[test]
    fn test_adjust_both_axes() {
        let s = Settings { speed: 50, brightness: 50 };
        assert_eq!(
            translate(set(&[LeftPlus, RightMinus]), s),
            Settings { speed: 60, brightness: 40 }
        );
    }

    #[test]
    fn test_clamps_at_bounds() {
        let s = Settings { speed: 95, brightness: 5 };
        let out = translate(set(&[LeftPlus, RightMinus]), s);
        assert_eq!(out, Settings { speed: 100, brightness: 0 });

        let s = Settings { speed: -95, brightness: 98 };
        let out = translate(set(&[LeftMinus, RightPlus]), s);
        assert_eq!(out, Settings { speed: -100, brightness: 100 });
    }

    #[test]
    fn test_reset_buttons() {
        let s = Settings { speed: -70, brightness: 80 };
        assert_eq!(translate(set(&[Left, Right]), s), Settings { speed: 0, brightness: 0 });
    }

    #[test]
    fn test_clamp_after_each_operation() {
        // plus saturates at 100, then minus takes one step off
        let s = Settings { speed: 100, brightness: 100 };
        assert_eq!(
            translate(set(&[LeftPlus, LeftMinus, RightPlus, RightMinus]), s),
            Settings { speed: 90, brightness: 90 }
        );
    }

    #[test]
    fn test_reset_wins_over_adjustment() {
        let s = Settings { speed: 30, brightness: 30 };
        assert_eq!(
            translate(set(&[LeftPlus, Left]), s),
            Settings { speed: 0, brightness: 30 }
        );
    }

    #[test]
    fn test_empty_and_center_leave_settings() {
        let s = Settings { speed: 12, brightness: 34 };
        assert_eq!(translate(ButtonSet::EMPTY, s), s);
        assert_eq!(translate(set(&[Center]), s), s);
    }

    #[test]
    fn test_custom_step() {
        let t = InputTranslator::new(25);
        let s = Settings { speed: 0, brightness: 0 };
        assert_eq!(
            t.translate(set(&[LeftMinus, RightPlus]), s),
            Settings { speed: -25, brightness: 25 }
        );
    }

    proptest! {
        #[test]
        fn output_always_in_range(
            bits in any::<u8>(),
            speed in -100i8..=100,
            brightness in 0u8..=100,
            step in 1u8..=100,
        ) {
            let out = InputTranslator::new(step)
                .translate(ButtonSet::from_bits(bits), Settings { speed, brightness });
            prop_assert!((-100..=100).contains(&out.speed));
            prop_assert!(out.brightness <= 100);
        }

        #[test]
        fn untouched_axis_is_preserved(
            bits in any::<u8>(),
            speed in -100i8..=100,
            brightness in 0u8..=100,
        ) {
            let pressed = ButtonSet::from_bits(bits);
            let out = translate(pressed, Settings { speed, brightness });
            if !pressed.contains(LeftPlus) && !pressed.contains(LeftMinus) && !pressed.contains(Left) {
                prop_assert_eq!(out.speed, speed);
            }
            if !pressed.contains(RightPlus) && !pressed.contains(RightMinus) && !pressed.contains(Right) {
                prop_assert_eq!(out.brightness, brightness);
            }
        }
    }
}
