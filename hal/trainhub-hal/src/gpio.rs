//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins, plus the
//! push-button view of an input pin that the control loop samples.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// A momentary push button sampled once per control tick
pub trait Button {
    /// Check whether the button is currently held down
    fn is_pressed(&mut self) -> bool;
}

/// Push button wired to an input pin
///
/// Most boards wire the button to ground with a pull-up, making it
/// active-low; `active_low` selects the polarity.
pub struct PushButton<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> PushButton<P> {
    /// Button that reads pressed when the pin is low
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    /// Button that reads pressed when the pin is high
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }
}

impl<P: InputPin> Button for PushButton<P> {
    fn is_pressed(&mut self) -> bool {
        self.pin.is_high() != self.active_low
    }
}
