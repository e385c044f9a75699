//! Identification and battery telemetry
//!
//! The battery feeds VSYS, which the board divides by 3 onto GPIO29
//! (ADC3), as on the Raspberry Pi Pico.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::watchdog::{self, Watchdog};
use trainhub_hal::{ResetReason, SystemInfo};

/// ADC reference voltage
const VREF_MV: u32 = 3300;
/// Divider ratio between VSYS and the ADC pin
const VSYS_DIVIDER: u32 = 3;
/// 12-bit converter
const ADC_COUNTS: u32 = 4096;

/// Convert a raw VSYS sample to millivolts
pub fn vsys_millivolts(raw: u16) -> u16 {
    (u32::from(raw) * VREF_MV * VSYS_DIVIDER / ADC_COUNTS) as u16
}

/// Map the watchdog's record of the last reset
pub fn reset_reason(watchdog: &Watchdog) -> ResetReason {
    match watchdog.reset_reason() {
        Some(watchdog::ResetReason::Forced) => ResetReason::Forced,
        Some(watchdog::ResetReason::TimedOut) => ResetReason::Watchdog,
        None => ResetReason::PowerOn,
    }
}

pub struct Rp2040System<'d> {
    name: &'static str,
    reset: ResetReason,
    adc: Adc<'d, Blocking>,
    vsys: Channel<'d>,
    last_mv: u16,
}

impl<'d> Rp2040System<'d> {
    pub fn new(
        name: &'static str,
        watchdog: &Watchdog,
        adc: Adc<'d, Blocking>,
        vsys: Channel<'d>,
    ) -> Self {
        Self {
            name,
            reset: reset_reason(watchdog),
            adc,
            vsys,
            last_mv: 0,
        }
    }
}

impl SystemInfo for Rp2040System<'_> {
    fn name(&self) -> &str {
        self.name
    }

    fn reset_reason(&self) -> ResetReason {
        self.reset
    }

    /// Falls back to the previous reading if the conversion fails
    fn battery_voltage_mv(&mut self) -> u16 {
        if let Ok(raw) = self.adc.blocking_read(&mut self.vsys) {
            self.last_mv = vsys_millivolts(raw);
        }
        self.last_mv
    }
}
