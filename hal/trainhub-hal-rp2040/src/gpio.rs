//! GPIO-backed inputs and outputs

use embassy_rp::gpio::{Input, Output};
use trainhub_hal::{Color, InputPin, OutputPin, PowerControl, StatusLight};

/// Input pin adapter
pub struct PinInput<'d>(Input<'d>);

impl<'d> PinInput<'d> {
    pub fn new(input: Input<'d>) -> Self {
        Self(input)
    }
}

impl InputPin for PinInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Output pin adapter
pub struct PinOutput<'d>(Output<'d>);

impl<'d> PinOutput<'d> {
    pub fn new(output: Output<'d>) -> Self {
        Self(output)
    }
}

impl OutputPin for PinOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// Single-colour status LED
///
/// Any colour other than [`Color::Off`] lights it.
pub struct LedStatusLight<P> {
    led: P,
}

impl<P: OutputPin> LedStatusLight<P> {
    pub fn new(mut led: P) -> Self {
        led.set_low();
        Self { led }
    }
}

impl<P: OutputPin> StatusLight for LedStatusLight<P> {
    fn set_color(&mut self, color: Color) {
        self.led.set_state(color != Color::Off);
    }
}

/// Self-holding power latch
///
/// The power button closes the supply long enough for the firmware to
/// drive the latch high; releasing it cuts the supply. Ending a session
/// keeps the latch held so the hub idles until it is reset.
pub struct PowerLatch<P> {
    latch: P,
}

impl<P: OutputPin> PowerLatch<P> {
    /// Take over the latch and hold power on
    pub fn hold(mut latch: P) -> Self {
        latch.set_high();
        Self { latch }
    }
}

impl<P: OutputPin> PowerControl for PowerLatch<P> {
    fn shutdown(&mut self) {
        self.latch.set_low();
    }

    // The latch stays high; the firmware idles until reset
    fn exit_session(&mut self) {}
}
