//! Time source abstraction
//!
//! The control loop reads time through [`Clock`] so press and retry
//! thresholds can be exercised with a simulated clock. Sleeping uses
//! `embedded_hal_async::delay::DelayNs`.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> u64;
}
