//! Mapping receiver replies onto remote operation results
//!
//! Each hub request is answered by one reply or by silence (`None`). The
//! functions here decide what a reply means for the request that caused
//! it, so the transport only has to deliver frames and enforce timeouts.

use heapless::String;
use trainhub_hal::{ButtonSet, RemoteError};

use crate::messages::{NackCode, ReceiverMessage, MAX_NAME_LEN};

/// Fatal code: the serial port failed
pub const FATAL_IO: u32 = 0x0100;
/// Fatal code: the receiver answered with a message that does not fit the request
pub const FATAL_UNEXPECTED_REPLY: u32 = 0x0200;
/// Fatal code base for receiver-internal failures; the low byte is the nack code
pub const FATAL_RECEIVER: u32 = 0x0300;

/// Short window the receiver has to answer a query or indicator request
pub const REPLY_WINDOW_MS: u64 = 50;

fn nack(code: NackCode) -> RemoteError {
    match code {
        NackCode::NotFound => RemoteError::NotFound,
        NackCode::NotBound => RemoteError::Disconnected,
        NackCode::Other(c) => RemoteError::Fatal(FATAL_RECEIVER | u32::from(c)),
    }
}

/// Outcome of a `Bind` request
///
/// Silence means no remote answered within the search window.
pub fn bind_outcome(reply: Option<ReceiverMessage>) -> Result<String<MAX_NAME_LEN>, RemoteError> {
    match reply {
        None => Err(RemoteError::Timeout),
        Some(ReceiverMessage::Bound { name }) => Ok(name),
        // A bind can only fail to find a remote, never lose one
        Some(ReceiverMessage::Nack(NackCode::NotBound)) => Err(RemoteError::NotFound),
        Some(ReceiverMessage::Nack(code)) => Err(nack(code)),
        Some(_) => Err(RemoteError::Fatal(FATAL_UNEXPECTED_REPLY)),
    }
}

/// Outcome of a `Query` request
///
/// Silence means the bound remote is gone.
pub fn query_outcome(reply: Option<ReceiverMessage>) -> Result<ButtonSet, RemoteError> {
    match reply {
        None => Err(RemoteError::Disconnected),
        Some(ReceiverMessage::Buttons(set)) => Ok(set),
        Some(ReceiverMessage::Nack(NackCode::NotFound)) => Err(RemoteError::Disconnected),
        Some(ReceiverMessage::Nack(code)) => Err(nack(code)),
        Some(_) => Err(RemoteError::Fatal(FATAL_UNEXPECTED_REPLY)),
    }
}

/// Outcome of a request answered by a plain `Ack` (indicator, release)
pub fn ack_outcome(reply: Option<ReceiverMessage>) -> Result<(), RemoteError> {
    match reply {
        None => Err(RemoteError::Disconnected),
        Some(ReceiverMessage::Ack) => Ok(()),
        Some(ReceiverMessage::Nack(NackCode::NotFound)) => Err(RemoteError::Disconnected),
        Some(ReceiverMessage::Nack(code)) => Err(nack(code)),
        Some(_) => Err(RemoteError::Fatal(FATAL_UNEXPECTED_REPLY)),
    }
}
