//! Test stores — mock `PlayerRecordStore` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use treasure_core::error::DomainError;
use treasure_core::record::{PlayerRecord, PlayerRecordStore};

/// An in-memory record store that counts saves.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    record: Mutex<PlayerRecord>,
    saves: Mutex<usize>,
}

impl MemoryRecordStore {
    /// Creates a store holding the zero-value record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with `record`.
    #[must_use]
    pub fn with_record(record: PlayerRecord) -> Self {
        Self {
            record: Mutex::new(record),
            saves: Mutex::new(0),
        }
    }

    /// Returns a snapshot of the stored record.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn record(&self) -> PlayerRecord {
        self.record.lock().unwrap().clone()
    }

    /// Returns how many times `save` was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl PlayerRecordStore for MemoryRecordStore {
    async fn load(&self) -> Result<PlayerRecord, DomainError> {
        Ok(self.record.lock().unwrap().clone())
    }

    async fn save(&self, record: &PlayerRecord) -> Result<(), DomainError> {
        *self.record.lock().unwrap() = record.clone();
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }
}

/// A record store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingRecordStore;

#[async_trait]
impl PlayerRecordStore for FailingRecordStore {
    async fn load(&self) -> Result<PlayerRecord, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn save(&self, _record: &PlayerRecord) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}
