//! Flash storage abstractions
//!
//! Provides a trait for durable key-value storage of small 32-bit records.
//! Board crates implement it on top of their flash memory; the dashboard
//! only ever needs to store and fetch a single packed word per key.

use core::future::Future;

/// Storage keys for persisted dashboard data
///
/// Each key holds exactly one 32-bit record. The record layout belongs to
/// whoever owns the key; storage treats it as an opaque word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Packed display mode (layout and secondary metric)
    DisplayMode = 0,
    /// Reserved for future use
    Reserved1 = 1,
    /// Reserved for future use
    Reserved2 = 2,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::DisplayMode),
            1 => Some(StorageKey::Reserved1),
            2 => Some(StorageKey::Reserved2),
            _ => None,
        }
    }
}

/// Errors from flash storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Flash operation failed
    Flash,
    /// Storage operation failed
    Storage,
    /// Key not found
    NotFound,
    /// Data corrupted or invalid
    Corrupted,
    /// Storage is full
    Full,
}

/// Flash storage trait
///
/// Durable storage of one 32-bit word per [`StorageKey`]. Implementations
/// should handle wear leveling and data integrity. Calls may block for an
/// unbounded time while flash is erased, so they must only be issued from
/// a task that is allowed to wait.
pub trait FlashStorage {
    /// Read the word stored under `key`
    ///
    /// Returns [`FlashError::NotFound`] if nothing was ever stored.
    fn read(&mut self, key: StorageKey) -> impl Future<Output = Result<u32, FlashError>>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: StorageKey, value: u32) -> impl Future<Output = Result<(), FlashError>>;

    /// Read the word stored under `key`, treating any failure as absent
    fn get(&mut self, key: StorageKey) -> impl Future<Output = Option<u32>> {
        async move { self.read(key).await.ok() }
    }

    /// Store `value` under `key`; failures are returned for the caller to log
    fn set(&mut self, key: StorageKey, value: u32) -> impl Future<Output = Result<(), FlashError>> {
        self.write(key, value)
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for key in [
            StorageKey::DisplayMode,
            StorageKey::Reserved1,
            StorageKey::Reserved2,
        ] {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(StorageKey::from_u8(3), None);
        assert_eq!(StorageKey::from_u8(0xFF), None);
    }
}
