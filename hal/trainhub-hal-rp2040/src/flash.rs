//! Flash-backed byte storage for RP2040
//!
//! Each byte offset is a key of a sequential-storage map in the last
//! flash sectors, so rewriting a byte appends a new entry instead of
//! erasing a sector. Offsets that were never written read as `0xFF`,
//! the erased value of NOR flash.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use trainhub_hal::storage::check_range;
use trainhub_hal::{ByteStorage, StorageError};

/// Total flash on the board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Sectors reserved for settings; must match the gap left in `memory.x`
pub const SETTINGS_SECTORS: usize = 4;
pub const SETTINGS_PARTITION_SIZE: usize = SETTINGS_SECTORS * ERASE_SIZE;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

/// Flash range of the settings partition
pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Number of addressable bytes
pub const CAPACITY: usize = 16;

/// Value of a byte that was never written
pub const ERASED: u8 = 0xFF;

/// Scratch space for one map entry (key, value and item header)
const ITEM_BUFFER_SIZE: usize = 32;

/// Byte storage on the RP2040's QSPI flash
pub struct Rp2040ByteStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040ByteStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }

    async fn read_byte(&mut self, key: u16) -> Result<u8, StorageError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        let value = map::fetch_item::<u16, u8, _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &key,
        )
        .await
        .map_err(storage_error)?;
        Ok(value.unwrap_or(ERASED))
    }

    async fn write_byte(&mut self, key: u16, value: u8) -> Result<(), StorageError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &key,
            &value,
        )
        .await
        .map_err(storage_error)
    }
}

fn storage_error<E>(e: sequential_storage::Error<E>) -> StorageError {
    match e {
        sequential_storage::Error::Storage { .. } => StorageError::Flash,
        sequential_storage::Error::FullStorage => StorageError::Full,
        _ => StorageError::Storage,
    }
}

impl ByteStorage for Rp2040ByteStorage<'_> {
    fn capacity(&self) -> usize {
        CAPACITY
    }

    async fn read_bytes(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StorageError> {
        check_range(CAPACITY, offset, buffer.len())?;
        for (key, slot) in (offset..).zip(buffer.iter_mut()) {
            *slot = self.read_byte(key).await?;
        }
        Ok(())
    }

    async fn write_bytes(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        check_range(CAPACITY, offset, data.len())?;
        for (key, &value) in (offset..).zip(data.iter()) {
            self.write_byte(key, value).await?;
        }
        Ok(())
    }
}
