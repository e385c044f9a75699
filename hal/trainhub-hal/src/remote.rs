//! Wireless remote abstractions
//!
//! A remote is acquired with a bounded search, after which its handle is
//! polled for the set of currently held buttons. Failures are reported as
//! an explicit [`RemoteError`] kind so callers can tell the expected,
//! transient classes (timeout, disconnect) apart from everything else.

use crate::actuator::Color;

/// Errors from remote operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteError {
    /// No remote answered within the search window
    Timeout,
    /// The radio reported that no remote can be bound
    NotFound,
    /// The bound remote is no longer reachable
    Disconnected,
    /// Any other failure, with an implementation-defined code
    Fatal(u32),
}

/// Buttons on the remote
///
/// The left cluster drives the motor, the right cluster drives the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RemoteButton {
    LeftPlus = 0,
    LeftMinus = 1,
    /// Red button of the left cluster
    Left = 2,
    RightPlus = 3,
    RightMinus = 4,
    /// Red button of the right cluster
    Right = 5,
    /// Green centre button
    Center = 6,
}

impl RemoteButton {
    /// All buttons in bit order
    pub const ALL: [RemoteButton; 7] = [
        RemoteButton::LeftPlus,
        RemoteButton::LeftMinus,
        RemoteButton::Left,
        RemoteButton::RightPlus,
        RemoteButton::RightMinus,
        RemoteButton::Right,
        RemoteButton::Center,
    ];

    /// Bit of this button within a [`ButtonSet`]
    pub const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of buttons held at the same time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonSet(u8);

impl ButtonSet {
    /// No buttons held
    pub const EMPTY: ButtonSet = ButtonSet(0);

    /// Mask of all defined button bits
    const VALID: u8 = 0x7F;

    /// Build a set from a raw bit mask, dropping undefined bits
    pub const fn from_bits(bits: u8) -> Self {
        ButtonSet(bits & Self::VALID)
    }

    /// Build a set from a list of buttons
    pub fn from_buttons(buttons: &[RemoteButton]) -> Self {
        buttons
            .iter()
            .fold(ButtonSet::EMPTY, |set, &b| set.with(b))
    }

    /// Raw bit mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Return a copy with `button` added
    pub const fn with(self, button: RemoteButton) -> Self {
        ButtonSet(self.0 | button.mask())
    }

    /// Add a button
    pub fn insert(&mut self, button: RemoteButton) {
        self.0 |= button.mask();
    }

    /// Check whether `button` is held
    pub const fn contains(self, button: RemoteButton) -> bool {
        self.0 & button.mask() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of held buttons
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the held buttons in bit order
    pub fn iter(self) -> impl Iterator<Item = RemoteButton> {
        RemoteButton::ALL
            .into_iter()
            .filter(move |b| self.contains(*b))
    }
}

/// Search primitive that binds a remote
pub trait RemoteAcquirer {
    /// Handle of a bound remote
    type Handle: RemoteHandle;

    /// Search for a remote, waiting at most `timeout_ms`
    ///
    /// Fails with [`RemoteError::Timeout`] when nothing answered in time.
    fn acquire(
        &mut self,
        timeout_ms: u32,
    ) -> impl core::future::Future<Output = Result<Self::Handle, RemoteError>>;
}

/// A bound remote
///
/// Dropping the handle releases the remote.
pub trait RemoteHandle {
    /// Human-readable name the remote advertised
    fn name(&self) -> &str;

    /// Query the set of currently held buttons
    ///
    /// Fails with [`RemoteError::Disconnected`] when the remote is gone.
    fn pressed_buttons(
        &mut self,
    ) -> impl core::future::Future<Output = Result<ButtonSet, RemoteError>>;

    /// Set the remote's own indicator light
    fn set_indicator(
        &mut self,
        color: Color,
    ) -> impl core::future::Future<Output = Result<(), RemoteError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_set_membership() {
        let set = ButtonSet::from_buttons(&[RemoteButton::LeftPlus, RemoteButton::RightMinus]);
        assert!(set.contains(RemoteButton::LeftPlus));
        assert!(set.contains(RemoteButton::RightMinus));
        assert!(!set.contains(RemoteButton::Left));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_button_set_from_bits_drops_undefined() {
        let set = ButtonSet::from_bits(0xFF);
        assert_eq!(set.bits(), 0x7F);
        assert_eq!(set.len(), 7);
    }

    #[test]
    fn test_button_set_iter_order() {
        let mut set = ButtonSet::EMPTY;
        set.insert(RemoteButton::Center);
        set.insert(RemoteButton::LeftMinus);
        let mut it = set.iter();
        assert_eq!(it.next(), Some(RemoteButton::LeftMinus));
        assert_eq!(it.next(), Some(RemoteButton::Center));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn test_empty_set() {
        assert!(ButtonSet::EMPTY.is_empty());
        assert_eq!(ButtonSet::default(), ButtonSet::EMPTY);
        assert_eq!(ButtonSet::EMPTY.iter().count(), 0);
    }
}
