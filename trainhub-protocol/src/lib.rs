//! Radio Receiver Protocol
//!
//! The hub talks to the wireless remote through a radio receiver module
//! attached to a UART. The receiver does the pairing and the air protocol;
//! the hub only asks it to bind a remote, poll the held buttons and set the
//! remote's indicator.
//!
//! # Frame format
//!
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–32B       │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Every hub request is answered by exactly one receiver reply, or by
//! silence when the receiver has nothing to report in time.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod session;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{HubMessage, NackCode, ReceiverMessage, MAX_NAME_LEN};
