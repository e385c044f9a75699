//! Error type of the control loop

use trainhub_hal::{RemoteError, StorageError};

/// Collaborator failure the control loop cannot absorb
///
/// Search timeouts and remote disconnects never surface here; they are
/// handled as connection state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Settings storage failed
    Storage(StorageError),
    /// Remote failed in a way other than timeout or disconnect
    Remote(RemoteError),
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

impl From<RemoteError> for Error {
    fn from(e: RemoteError) -> Self {
        Error::Remote(e)
    }
}
