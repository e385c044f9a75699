//! Settings persistence over byte storage
//!
//! Flash endures a limited number of erase cycles, so `save` compares
//! against what is already stored and writes only the bytes that differ.

use trainhub_hal::{ByteStorage, StorageError};

use super::codec::{encode_brightness, encode_speed, BRIGHTNESS_OFFSET, ENCODED_LEN, SPEED_OFFSET};
use super::Settings;

/// Which bytes a [`SettingsStore::save`] call wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SaveOutcome {
    pub speed_written: bool,
    pub brightness_written: bool,
}

impl SaveOutcome {
    /// Number of single-byte writes performed
    pub fn writes(&self) -> usize {
        self.speed_written as usize + self.brightness_written as usize
    }
}

/// Persistent store of the actuator settings
pub struct SettingsStore<S> {
    storage: S,
}

impl<S: ByteStorage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the stored settings
    ///
    /// Blank or corrupt bytes decode to the defaults; only I/O errors fail.
    pub async fn load(&mut self) -> Result<Settings, StorageError> {
        let mut raw = [0u8; ENCODED_LEN];
        self.storage.read_bytes(SPEED_OFFSET, &mut raw).await?;
        Ok(Settings::decode(raw))
    }

    /// Store `current`, writing each byte only if its field changed
    pub async fn save(&mut self, current: Settings) -> Result<SaveOutcome, StorageError> {
        let stored = self.load().await?;
        let mut outcome = SaveOutcome::default();

        if stored.speed != current.speed {
            self.storage
                .write_bytes(SPEED_OFFSET, &[encode_speed(current.speed)])
                .await?;
            outcome.speed_written = true;
        }

        if stored.brightness != current.brightness {
            self.storage
                .write_bytes(BRIGHTNESS_OFFSET, &[encode_brightness(current.brightness)])
                .await?;
            outcome.brightness_written = true;
        }

        Ok(outcome)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
