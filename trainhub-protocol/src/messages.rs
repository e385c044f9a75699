//! Message types
//!
//! Hub → receiver requests use type ids `0x10..`, receiver → hub replies
//! use `0x01..`.

use heapless::String;
use trainhub_hal::{ButtonSet, Color};

use crate::frame::{Frame, FrameError};

// Hub → receiver
pub const MSG_BIND: u8 = 0x10;
pub const MSG_QUERY: u8 = 0x11;
pub const MSG_INDICATOR: u8 = 0x12;
pub const MSG_RELEASE: u8 = 0x13;

// Receiver → hub
pub const MSG_BOUND: u8 = 0x01;
pub const MSG_BUTTONS: u8 = 0x02;
pub const MSG_NACK: u8 = 0x03;
pub const MSG_ACK: u8 = 0x04;

/// Longest remote name the receiver reports
pub const MAX_NAME_LEN: usize = 24;

/// Requests sent by the hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HubMessage {
    /// Search for a remote and bind it, giving up after `timeout_ms`
    Bind { timeout_ms: u16 },
    /// Ask for the set of buttons currently held
    Query,
    /// Set the bound remote's indicator
    Indicator(Color),
    /// Drop the bound remote
    Release,
}

impl HubMessage {
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match *self {
            HubMessage::Bind { timeout_ms } => Frame::new(MSG_BIND, &timeout_ms.to_le_bytes()),
            HubMessage::Query => Ok(Frame::empty(MSG_QUERY)),
            HubMessage::Indicator(color) => Frame::new(MSG_INDICATOR, &[color.as_u8()]),
            HubMessage::Release => Ok(Frame::empty(MSG_RELEASE)),
        }
    }

    /// Parse a hub request (receiver side and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let p = frame.payload.as_slice();
        match (frame.msg_type, p) {
            (MSG_BIND, [lo, hi]) => Ok(HubMessage::Bind {
                timeout_ms: u16::from_le_bytes([*lo, *hi]),
            }),
            (MSG_QUERY, []) => Ok(HubMessage::Query),
            (MSG_INDICATOR, [c]) => Color::from_u8(*c)
                .map(HubMessage::Indicator)
                .ok_or(FrameError::InvalidFrame),
            (MSG_RELEASE, []) => Ok(HubMessage::Release),
            (MSG_BIND | MSG_QUERY | MSG_INDICATOR | MSG_RELEASE, _) => {
                Err(FrameError::InvalidFrame)
            }
            (other, _) => Err(FrameError::UnknownType(other)),
        }
    }
}

/// Reasons the receiver refuses a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackCode {
    /// No pairable remote in range
    NotFound,
    /// No remote is bound, or the bound one went out of range
    NotBound,
    /// Receiver-internal failure
    Other(u8),
}

impl NackCode {
    pub fn from_u8(code: u8) -> Self {
        match code {
            0x01 => NackCode::NotFound,
            0x02 => NackCode::NotBound,
            other => NackCode::Other(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            NackCode::NotFound => 0x01,
            NackCode::NotBound => 0x02,
            NackCode::Other(code) => code,
        }
    }
}

/// Replies sent by the receiver
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverMessage {
    /// A remote was bound
    Bound { name: String<MAX_NAME_LEN> },
    /// Currently held buttons
    Buttons(ButtonSet),
    /// Request refused
    Nack(NackCode),
    /// Request carried out
    Ack,
}

impl ReceiverMessage {
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let p = frame.payload.as_slice();
        match (frame.msg_type, p) {
            (MSG_BOUND, name) => {
                let name = core::str::from_utf8(name).map_err(|_| FrameError::InvalidFrame)?;
                let name = String::try_from(name).map_err(|_| FrameError::InvalidFrame)?;
                Ok(ReceiverMessage::Bound { name })
            }
            (MSG_BUTTONS, [mask]) => Ok(ReceiverMessage::Buttons(ButtonSet::from_bits(*mask))),
            (MSG_NACK, [code]) => Ok(ReceiverMessage::Nack(NackCode::from_u8(*code))),
            (MSG_ACK, []) => Ok(ReceiverMessage::Ack),
            (MSG_BUTTONS | MSG_NACK | MSG_ACK, _) => Err(FrameError::InvalidFrame),
            (other, _) => Err(FrameError::UnknownType(other)),
        }
    }

    /// Encode a reply (receiver side and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ReceiverMessage::Bound { name } => Frame::new(MSG_BOUND, name.as_bytes()),
            ReceiverMessage::Buttons(set) => Frame::new(MSG_BUTTONS, &[set.bits()]),
            ReceiverMessage::Nack(code) => Frame::new(MSG_NACK, &[code.as_u8()]),
            ReceiverMessage::Ack => Ok(Frame::empty(MSG_ACK)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FrameParser;
    use trainhub_hal::RemoteButton;

    fn reparse(frame: &Frame) -> Frame {
        let mut parser = FrameParser::new();
        parser.push_slice(&frame.to_bytes()).unwrap().0.unwrap()
    }

    #[test]
    fn test_bind_carries_timeout_le() {
        let frame = HubMessage::Bind { timeout_ms: 2000 }.to_frame().unwrap();
        assert_eq!(frame.msg_type, MSG_BIND);
        assert_eq!(frame.payload.as_slice(), &[0xD0, 0x07]);
        assert_eq!(
            HubMessage::from_frame(&reparse(&frame)),
            Ok(HubMessage::Bind { timeout_ms: 2000 })
        );
    }

    #[test]
    fn test_indicator_rejects_unknown_color() {
        let frame = Frame::new(MSG_INDICATOR, &[0x7F]).unwrap();
        assert_eq!(HubMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_bound_name() {
        let frame = Frame::new(MSG_BOUND, b"Handset 1").unwrap();
        match ReceiverMessage::from_frame(&frame).unwrap() {
            ReceiverMessage::Bound { name } => assert_eq!(name.as_str(), "Handset 1"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_bound_rejects_long_or_invalid_name() {
        let long = [b'x'; MAX_NAME_LEN + 1];
        let frame = Frame::new(MSG_BOUND, &long).unwrap();
        assert_eq!(ReceiverMessage::from_frame(&frame), Err(FrameError::InvalidFrame));

        let frame = Frame::new(MSG_BOUND, &[0xFF, 0xFE]).unwrap();
        assert_eq!(ReceiverMessage::from_frame(&frame), Err(FrameError::InvalidFrame));
    }

    #[test]
    fn test_buttons_mask() {
        let frame = Frame::new(MSG_BUTTONS, &[0b0000_1001]).unwrap();
        let msg = ReceiverMessage::from_frame(&frame).unwrap();
        let expected = ButtonSet::from_buttons(&[RemoteButton::LeftPlus, RemoteButton::RightPlus]);
        assert_eq!(msg, ReceiverMessage::Buttons(expected));
    }

    #[test]
    fn test_nack_codes() {
        let frame = ReceiverMessage::Nack(NackCode::NotBound).to_frame().unwrap();
        assert_eq!(
            ReceiverMessage::from_frame(&frame),
            Ok(ReceiverMessage::Nack(NackCode::NotBound))
        );
        assert_eq!(NackCode::from_u8(0x42), NackCode::Other(0x42));
    }

    #[test]
    fn test_unknown_and_malformed_types() {
        assert_eq!(
            ReceiverMessage::from_frame(&Frame::empty(0x7E)),
            Err(FrameError::UnknownType(0x7E))
        );
        assert_eq!(
            ReceiverMessage::from_frame(&Frame::empty(MSG_BUTTONS)),
            Err(FrameError::InvalidFrame)
        );
        assert_eq!(
            HubMessage::from_frame(&Frame::new(MSG_QUERY, &[1]).unwrap()),
            Err(FrameError::InvalidFrame)
        );
    }
}
