//! Host-side doubles shared by unit tests

use candash_hal::{FlashError, FlashStorage, StorageKey};

/// In-memory flash holding one word per key
#[derive(Debug, Default)]
pub struct MemoryStorage {
    words: [Option<u32>; 3],
    pub reads: usize,
    pub writes: usize,
    pub fail_reads: Option<FlashError>,
    pub fail_writes: Option<FlashError>,
}

impl MemoryStorage {
    pub fn with(key: StorageKey, word: u32) -> Self {
        let mut storage = Self::default();
        storage.words[key.as_u8() as usize] = Some(word);
        storage
    }

    /// Every read fails with `error`
    pub fn failing_reads(error: FlashError) -> Self {
        Self {
            fail_reads: Some(error),
            ..Self::default()
        }
    }

    /// Every write fails with `error`
    pub fn failing_writes(error: FlashError) -> Self {
        Self {
            fail_writes: Some(error),
            ..Self::default()
        }
    }

    pub fn word(&self, key: StorageKey) -> Option<u32> {
        self.words[key.as_u8() as usize]
    }
}

impl FlashStorage for MemoryStorage {
    async fn read(&mut self, key: StorageKey) -> Result<u32, FlashError> {
        self.reads += 1;
        if let Some(e) = self.fail_reads {
            return Err(e);
        }
        self.word(key).ok_or(FlashError::NotFound)
    }

    async fn write(&mut self, key: StorageKey, value: u32) -> Result<(), FlashError> {
        self.writes += 1;
        if let Some(e) = self.fail_writes {
            return Err(e);
        }
        self.words[key.as_u8() as usize] = Some(value);
        Ok(())
    }
}
