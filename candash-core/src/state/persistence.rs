//! Debounced display mode persistence
//!
//! [`ModePersistence`] owns the storage handle, so whichever task holds it
//! is the only one that can touch flash. The firmware gives it to the render
//! task. Input handlers never wait on a flash write.
//!
//! Persistence is best effort. A failed write is reported and not retried:
//! the marker still moves to the value we tried to write, and the next write
//! happens only after the mode changes again. The in-memory mode stays
//! authoritative either way.

use candash_hal::{FlashError, FlashStorage, StorageKey};

use super::display_mode::{DisplayMode, ModeDecodeError};
use super::store::DisplayModeStore;

/// What startup restore found in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RestoreOutcome {
    /// A valid mode was stored and is now live
    Restored(DisplayMode),
    /// Nothing stored, or the read failed; the default was written
    Defaulted { written: Result<(), FlashError> },
    /// The stored word was not a valid mode; the default was written
    Corrupted {
        error: ModeDecodeError,
        written: Result<(), FlashError>,
    },
}

/// What one render-cycle sync did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncOutcome {
    /// Live mode matches the last persisted word
    Unchanged,
    /// Live mode differed and was written
    Persisted(DisplayMode),
    /// Live mode differed and the write failed
    Failed(FlashError),
}

/// Owner of the display mode's storage slot
pub struct ModePersistence<S> {
    storage: S,
    /// Last word written (or found) in storage
    persisted: u32,
}

impl<S: FlashStorage> ModePersistence<S> {
    /// Load the stored mode into `store`, repairing storage if needed
    ///
    /// Runs once at startup, before any input handler can advance the mode.
    pub async fn restore(mut storage: S, store: &DisplayModeStore) -> (Self, RestoreOutcome) {
        let found = storage.get(StorageKey::DisplayMode).await;

        let outcome = match found.map(DisplayMode::unpack) {
            Some(Ok(mode)) => {
                store.set(mode);
                let persistence = Self {
                    storage,
                    persisted: mode.pack(),
                };
                return (persistence, RestoreOutcome::Restored(mode));
            }
            Some(Err(error)) => {
                let written = Self::write_default(&mut storage, store).await;
                RestoreOutcome::Corrupted { error, written }
            }
            None => {
                let written = Self::write_default(&mut storage, store).await;
                RestoreOutcome::Defaulted { written }
            }
        };

        let persistence = Self {
            storage,
            persisted: DisplayMode::default().pack(),
        };
        (persistence, outcome)
    }

    async fn write_default(storage: &mut S, store: &DisplayModeStore) -> Result<(), FlashError> {
        let mode = DisplayMode::default();
        store.set(mode);
        storage.set(StorageKey::DisplayMode, mode.pack()).await
    }

    /// Persist the live mode if it changed since the last write
    ///
    /// Compares packed words, so any number of advances between two calls
    /// costs at most one write, and none if they cancel out.
    pub async fn sync(&mut self, store: &DisplayModeStore) -> SyncOutcome {
        let current = store.packed();
        if current == self.persisted {
            return SyncOutcome::Unchanged;
        }

        self.persisted = current;
        match self.storage.set(StorageKey::DisplayMode, current).await {
            Ok(()) => SyncOutcome::Persisted(DisplayMode::unpack(current).unwrap_or_default()),
            Err(e) => SyncOutcome::Failed(e),
        }
    }

    /// Last word written to (or found in) storage
    pub fn persisted(&self) -> u32 {
        self.persisted
    }

    /// Give the storage handle back
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Layout, SecondaryMetric};
    use crate::testing::MemoryStorage;
    use embassy_futures::block_on;

    fn restore(storage: MemoryStorage) -> (ModePersistence<MemoryStorage>, RestoreOutcome, DisplayModeStore) {
        let store = DisplayModeStore::default();
        let (persistence, outcome) = block_on(ModePersistence::restore(storage, &store));
        (persistence, outcome, store)
    }

    #[test]
    fn test_restore_valid_mode() {
        let mode = DisplayMode::new(Layout::B, SecondaryMetric::P1);
        let (persistence, outcome, store) =
            restore(MemoryStorage::with(StorageKey::DisplayMode, mode.pack()));

        assert_eq!(outcome, RestoreOutcome::Restored(mode));
        assert_eq!(store.current(), mode);
        let storage = persistence.into_storage();
        assert_eq!(storage.writes, 0);
    }

    #[test]
    fn test_restore_empty_writes_default() {
        let (persistence, outcome, store) = restore(MemoryStorage::default());

        assert_eq!(outcome, RestoreOutcome::Defaulted { written: Ok(()) });
        assert_eq!(store.current(), DisplayMode::default());
        let storage = persistence.into_storage();
        assert_eq!(storage.writes, 1);
        assert_eq!(
            storage.word(StorageKey::DisplayMode),
            Some(DisplayMode::default().pack())
        );
    }

    #[test]
    fn test_restore_failed_read_is_absent() {
        let (_, outcome, store) = restore(MemoryStorage::failing_reads(FlashError::Flash));
        assert_eq!(outcome, RestoreOutcome::Defaulted { written: Ok(()) });
        assert_eq!(store.current(), DisplayMode::default());
    }

    #[test]
    fn test_restore_corrupt_word_repairs_storage() {
        let (persistence, outcome, store) =
            restore(MemoryStorage::with(StorageKey::DisplayMode, 0x0100_0005));

        assert_eq!(
            outcome,
            RestoreOutcome::Corrupted {
                error: ModeDecodeError::Layout(5),
                written: Ok(()),
            }
        );
        assert_eq!(store.current(), DisplayMode::default());
        let storage = persistence.into_storage();
        assert_eq!(
            storage.word(StorageKey::DisplayMode),
            Some(DisplayMode::default().pack())
        );
    }

    #[test]
    fn test_restore_write_failure_is_reported() {
        let (_, outcome, store) = restore(MemoryStorage::failing_writes(FlashError::Full));
        assert_eq!(
            outcome,
            RestoreOutcome::Defaulted {
                written: Err(FlashError::Full)
            }
        );
        assert_eq!(store.current(), DisplayMode::default());
    }

    #[test]
    fn test_sync_unchanged_does_not_write() {
        let (mut persistence, _, store) = restore(MemoryStorage::default());
        for _ in 0..10 {
            assert_eq!(block_on(persistence.sync(&store)), SyncOutcome::Unchanged);
        }
        assert_eq!(persistence.into_storage().writes, 1);
    }

    #[test]
    fn test_five_advances_one_write() {
        let (mut persistence, _, store) = restore(MemoryStorage::default());
        let initial = store.current();

        for _ in 0..5 {
            store.advance_layout();
        }
        let expected = DisplayMode::new(initial.layout.next(), initial.secondary_metric);
        assert_eq!(block_on(persistence.sync(&store)), SyncOutcome::Persisted(expected));
        assert_eq!(block_on(persistence.sync(&store)), SyncOutcome::Unchanged);

        let storage = persistence.into_storage();
        // One write at restore, one for the five advances
        assert_eq!(storage.writes, 2);
        assert_eq!(storage.word(StorageKey::DisplayMode), Some(expected.pack()));
    }

    #[test]
    fn test_cancelling_advances_do_not_write() {
        let (mut persistence, _, store) = restore(MemoryStorage::default());
        store.advance_secondary_metric();
        store.advance_secondary_metric();
        assert_eq!(block_on(persistence.sync(&store)), SyncOutcome::Unchanged);
        assert_eq!(persistence.into_storage().writes, 1);
    }

    #[test]
    fn test_failed_write_is_not_retried() {
        let (mut persistence, _, store) = restore(MemoryStorage::default());
        persistence.storage.fail_writes = Some(FlashError::Flash);

        store.advance_layout();
        assert_eq!(
            block_on(persistence.sync(&store)),
            SyncOutcome::Failed(FlashError::Flash)
        );
        assert_eq!(persistence.persisted(), store.packed());
        assert_eq!(block_on(persistence.sync(&store)), SyncOutcome::Unchanged);
        assert_eq!(store.current().layout, Layout::B);

        persistence.storage.fail_writes = None;
        store.advance_layout();
        assert_eq!(
            block_on(persistence.sync(&store)),
            SyncOutcome::Persisted(DisplayMode::default())
        );
        // restore + failed + successful
        assert_eq!(persistence.into_storage().writes, 3);
    }
}
