//! RP2040 board layer of the battery hub
//!
//! Implements the `trainhub-hal` traits on RP2040 peripherals:
//!
//! - Wear-leveled byte storage in the last flash sectors
//! - PWM H-bridge motor and PWM light outputs
//! - Push button, status LED and power latch GPIO
//! - Battery voltage on the VSYS ADC channel and watchdog reset reason
//! - Wireless remote through a UART-attached radio receiver

#![no_std]

pub mod flash;
pub mod gpio;
pub mod pwm;
pub mod radio;
pub mod system;

pub use flash::Rp2040ByteStorage;
pub use gpio::{LedStatusLight, PinInput, PinOutput, PowerLatch};
pub use pwm::{PwmLight, PwmMotor};
pub use radio::{RadioRemote, UartRadio};
pub use system::Rp2040System;
