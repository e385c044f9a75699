//! Configuration type definitions

use trainhub_hal::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default control tick period
pub const DEFAULT_TICK_MS: u32 = 100;

/// Default speed/brightness change per remote press
pub const DEFAULT_STEP: u8 = 10;

/// What a medium press of the hub button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBehavior {
    /// Toggle the motor off (or back on), keep running
    #[default]
    PauseMotor,
    /// Zero the outputs and end the operating session
    ExitSession,
}

impl StopBehavior {
    /// Parse the configuration-file name (`"pause"` or `"exit"`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pause" => Some(StopBehavior::PauseMotor),
            "exit" => Some(StopBehavior::ExitSession),
            _ => None,
        }
    }
}

/// Hold-time thresholds of the hub button
///
/// A press released before `short_max_ms` is short, one released before
/// `stop_max_ms` is a stop request, and holding for `power_off_ms` powers
/// the hub off. Releases between `stop_max_ms` and `power_off_ms` do
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressThresholds {
    pub short_max_ms: u32,
    pub stop_max_ms: u32,
    pub power_off_ms: u32,
}

impl Default for PressThresholds {
    fn default() -> Self {
        Self {
            short_max_ms: 1500,
            stop_max_ms: 4500,
            power_off_ms: 5000,
        }
    }
}

/// Remote search timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RemoteTiming {
    /// Minimum gap between failed searches
    pub retry_interval_ms: u32,
    /// Upper bound of a single search
    pub search_timeout_ms: u32,
}

impl Default for RemoteTiming {
    fn default() -> Self {
        Self {
            retry_interval_ms: 10_000,
            search_timeout_ms: 2_000,
        }
    }
}

/// Complete control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Poll period of the loop
    pub tick_ms: u32,
    /// Change per remote press, for both speed and brightness
    pub step: u8,
    pub stop_behavior: StopBehavior,
    pub press: PressThresholds,
    pub remote: RemoteTiming,
    /// Colour shown on the remote once it is bound
    pub indicator: Color,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            step: DEFAULT_STEP,
            stop_behavior: StopBehavior::default(),
            press: PressThresholds::default(),
            remote: RemoteTiming::default(),
            indicator: Color::Green,
        }
    }
}

/// Inconsistent configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    ZeroTickPeriod,
    /// Step outside `1..=100`
    StepOutOfRange,
    /// Press thresholds not ordered `short < stop <= power_off`
    ThresholdOrder,
    ZeroRetryInterval,
    ZeroSearchTimeout,
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if !(1..=100).contains(&self.step) {
            return Err(ConfigError::StepOutOfRange);
        }
        let p = &self.press;
        if p.short_max_ms == 0 || p.short_max_ms >= p.stop_max_ms || p.stop_max_ms > p.power_off_ms
        {
            return Err(ConfigError::ThresholdOrder);
        }
        if self.remote.retry_interval_ms == 0 {
            return Err(ConfigError::ZeroRetryInterval);
        }
        if self.remote.search_timeout_ms == 0 {
            return Err(ConfigError::ZeroSearchTimeout);
        }
        Ok(())
    }
}
