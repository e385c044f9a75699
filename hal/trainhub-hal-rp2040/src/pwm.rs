//! PWM actuator outputs
//!
//! The motor is driven through an H-bridge whose two inputs sit on the A
//! and B channels of one PWM slice: A carries the forward duty, B the
//! reverse duty, and the idle channel is held at 0. The light uses a
//! single channel.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use trainhub_hal::{LightOutput, MotorOutput};

/// PWM counter wrap value; 125 MHz / 5000 = 25 kHz, above audible range
pub const PWM_TOP: u16 = 4999;

/// Compare value for `percent` of a period of `top + 1` counts
pub fn percent_to_compare(percent: u8, top: u16) -> u16 {
    let counts = u32::from(top) + 1;
    (u32::from(percent.min(100)) * counts / 100) as u16
}

/// Channel A and B compare values for a signed motor output
pub fn bridge_compare(value: i8, top: u16) -> (u16, u16) {
    let duty = percent_to_compare(value.unsigned_abs(), top);
    if value >= 0 {
        (duty, 0)
    } else {
        (0, duty)
    }
}

fn base_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = PWM_TOP;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// H-bridge motor on one PWM slice
pub struct PwmMotor<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmMotor<'d> {
    /// Take a slice configured with both outputs (`Pwm::new_output_ab`)
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let config = base_config();
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl MotorOutput for PwmMotor<'_> {
    fn set_output(&mut self, value: i8) {
        let (a, b) = bridge_compare(value.clamp(-100, 100), self.config.top);
        self.config.compare_a = a;
        self.config.compare_b = b;
        self.pwm.set_config(&self.config);
    }
}

/// Dimmable light on channel A of a PWM slice
pub struct PwmLight<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmLight<'d> {
    /// Take a slice configured with output A (`Pwm::new_output_a`)
    pub fn new(mut pwm: Pwm<'d>) -> Self {
        let config = base_config();
        pwm.set_config(&config);
        Self { pwm, config }
    }
}

impl LightOutput for PwmLight<'_> {
    fn set_level(&mut self, level: u8) {
        self.config.compare_a = percent_to_compare(level, self.config.top);
        self.pwm.set_config(&self.config);
    }
}
