//! Hub button press classification
//!
//! ```text
//!            down                      held >= power_off_ms
//! Released ───────► Pressed(since) ──────────────────────► PowerOff (once)
//!    ▲                   │
//!    └───────────────────┘ up: held < short  → ShortPress
//!                              held < stop   → StopRequest
//!                              otherwise     → nothing
//! ```

use crate::config::PressThresholds;

/// Result of sampling the button once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    #[default]
    NoEvent,
    /// Quick press and release
    ShortPress,
    /// Medium-length press, released
    StopRequest,
    /// Button held long enough to power off
    PowerOff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PressState {
    Released,
    Pressed { since: u64, power_off_sent: bool },
}

/// Classifies press durations of a single button
#[derive(Debug, Clone)]
pub struct PressClassifier {
    thresholds: PressThresholds,
    state: PressState,
}

impl Default for PressClassifier {
    fn default() -> Self {
        Self::new(PressThresholds::default())
    }
}

impl PressClassifier {
    pub fn new(thresholds: PressThresholds) -> Self {
        Self {
            thresholds,
            state: PressState::Released,
        }
    }

    /// Whether the button is currently considered held
    pub fn is_pressed(&self) -> bool {
        matches!(self.state, PressState::Pressed { .. })
    }

    /// Feed one sample; at most one action per call
    pub fn update(&mut self, is_down: bool, now_ms: u64) -> ButtonAction {
        match (self.state, is_down) {
            (PressState::Released, false) => ButtonAction::NoEvent,
            (PressState::Released, true) => {
                self.state = PressState::Pressed {
                    since: now_ms,
                    power_off_sent: false,
                };
                ButtonAction::NoEvent
            }
            (PressState::Pressed { since, power_off_sent }, true) => {
                let held = now_ms.saturating_sub(since);
                if !power_off_sent && held >= u64::from(self.thresholds.power_off_ms) {
                    self.state = PressState::Pressed {
                        since,
                        power_off_sent: true,
                    };
                    ButtonAction::PowerOff
                } else {
                    ButtonAction::NoEvent
                }
            }
            (PressState::Pressed { since, .. }, false) => {
                self.state = PressState::Released;
                let held = now_ms.saturating_sub(since);
                if held < u64::from(self.thresholds.short_max_ms) {
                    ButtonAction::ShortPress
                } else if held < u64::from(self.thresholds.stop_max_ms) {
                    ButtonAction::StopRequest
                } else {
                    ButtonAction::NoEvent
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hold from `start` to `release` in 100 ms samples, return all actions
    fn press(c: &mut PressClassifier, start: u64, release: u64) -> [usize; 4] {
        let mut counts = [0usize; 4];
        let mut t = start;
        while t < release {
            counts[c.update(true, t) as usize] += 1;
            t += 100;
        }
        counts[c.update(false, release) as usize] += 1;
        counts
    }

    fn last_release(c: &mut PressClassifier, start: u64, release: u64) -> ButtonAction {
        c.update(true, start);
        c.update(false, release)
    }

    #[test]
    fn test_idle_emits_nothing() {
        let mut c = PressClassifier::default();
        for t in (0..1000).step_by(100) {
            assert_eq!(c.update(false, t), ButtonAction::NoEvent);
        }
    }

    #[test]
    fn test_short_press() {
        let mut c = PressClassifier::default();
        assert_eq!(last_release(&mut c, 0, 1000), ButtonAction::ShortPress);
        assert!(!c.is_pressed());
    }

    #[test]
    fn test_stop_request() {
        let mut c = PressClassifier::default();
        assert_eq!(last_release(&mut c, 0, 3000), ButtonAction::StopRequest);
    }

    #[test]
    fn test_threshold_edges() {
        let mut c = PressClassifier::default();
        assert_eq!(last_release(&mut c, 0, 1499), ButtonAction::ShortPress);
        assert_eq!(last_release(&mut c, 10_000, 11_500), ButtonAction::StopRequest);
        assert_eq!(last_release(&mut c, 20_000, 24_499), ButtonAction::StopRequest);
        assert_eq!(last_release(&mut c, 30_000, 34_500), ButtonAction::NoEvent);
    }

    #[test]
    fn test_dead_zone_release_is_silent() {
        let mut c = PressClassifier::default();
        let counts = press(&mut c, 0, 4800);
        assert_eq!(counts[ButtonAction::NoEvent as usize], 49);
        assert_eq!(counts[ButtonAction::PowerOff as usize], 0);
    }

    #[test]
    fn test_power_off_emitted_once() {
        let mut c = PressClassifier::default();
        let counts = press(&mut c, 0, 8000);
        assert_eq!(counts[ButtonAction::PowerOff as usize], 1);
        assert_eq!(counts[ButtonAction::ShortPress as usize], 0);
        assert_eq!(counts[ButtonAction::StopRequest as usize], 0);
    }

    #[test]
    fn test_power_off_on_first_crossing_tick() {
        let mut c = PressClassifier::default();
        c.update(true, 0);
        assert_eq!(c.update(true, 4999), ButtonAction::NoEvent);
        assert_eq!(c.update(true, 5000), ButtonAction::PowerOff);
        assert_eq!(c.update(true, 5100), ButtonAction::NoEvent);
        assert!(c.is_pressed());
    }

    #[test]
    fn test_custom_thresholds() {
        let mut c = PressClassifier::new(PressThresholds {
            short_max_ms: 200,
            stop_max_ms: 800,
            power_off_ms: 1000,
        });
        assert_eq!(last_release(&mut c, 0, 300), ButtonAction::StopRequest);
        c.update(true, 1000);
        assert_eq!(c.update(true, 2000), ButtonAction::PowerOff);
    }
}
