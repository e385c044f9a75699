//! Power and identification services

/// Power control of the device
pub trait PowerControl {
    /// Power the device off unconditionally
    fn shutdown(&mut self);

    /// End the current operating session without powering off
    fn exit_session(&mut self);
}

/// Why the device last came out of reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetReason {
    /// Cold start (battery inserted, power button)
    PowerOn,
    /// Software-requested reset
    Forced,
    /// Watchdog expired
    Watchdog,
    /// Cause not reported by the hardware
    Unknown,
}

/// Identification and battery telemetry of the device
pub trait SystemInfo {
    /// Device name
    fn name(&self) -> &str;

    /// Reason for the last reset
    fn reset_reason(&self) -> ResetReason;

    /// Battery voltage in millivolts
    fn battery_voltage_mv(&mut self) -> u16;

    /// Battery current in milliamps, if the board can measure it
    fn battery_current_ma(&mut self) -> Option<u16> {
        None
    }
}
