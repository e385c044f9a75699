//! Non-volatile storage abstractions
//!
//! The core persists its settings as single bytes at fixed offsets of a
//! small byte-addressed region. Implementations decide how a byte maps onto
//! flash pages (wear leveling, erase handling); the core only assumes that
//! each call is atomic and that a never-written byte reads back as some
//! value rather than an error.

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Flash operation failed
    Flash,
    /// Storage layer (wear leveling, bookkeeping) failed
    Storage,
    /// Offset and length fall outside the storage region
    OutOfRange,
    /// Storage region is full and could not be compacted
    Full,
}

/// Byte-addressed non-volatile storage
pub trait ByteStorage {
    /// Size of the addressable region in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    ///
    /// Bytes that were never written read back as the erased value of the
    /// underlying medium (`0xFF` for NOR flash).
    fn read_bytes(
        &mut self,
        offset: u16,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;

    /// Write `data` starting at `offset`
    fn write_bytes(
        &mut self,
        offset: u16,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;
}

/// Check that `len` bytes at `offset` fit in a region of `capacity` bytes
pub fn check_range(capacity: usize, offset: u16, len: usize) -> Result<(), StorageError> {
    match (offset as usize).checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StorageError::OutOfRange),
    }
}
