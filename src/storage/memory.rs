use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    domain::transaction::Transaction,
    errors::{LedgerError, Result},
};

use super::StorageBackend;

#[derive(Debug, Default)]
struct Slot {
    data: Option<String>,
    reject_writes: bool,
    writes: usize,
}

/// Single serialized slot held in memory.
///
/// Mirrors a browser storage key: the ledger is stored as JSON text, so a
/// round trip exercises the same serialization as the file backend. Clones
/// share the slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with raw text, valid or not.
    pub fn with_raw(data: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().data = Some(data.into());
        storage
    }

    /// Makes subsequent saves fail, as a full or read-only store would.
    pub fn reject_writes(&self, reject: bool) {
        self.lock().reject_writes = reject;
    }

    pub fn raw(&self) -> Option<String> {
        self.lock().data.clone()
    }

    /// Number of successful saves.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // A poisoned slot still holds consistent text.
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self) -> Result<Vec<Transaction>> {
        match self.lock().data.as_deref() {
            None => Ok(Vec::new()),
            Some(text) if text.trim().is_empty() => Ok(Vec::new()),
            Some(text) => Ok(serde_json::from_str(text)?),
        }
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string(transactions)?;
        let mut slot = self.lock();
        if slot.reject_writes {
            return Err(LedgerError::Persistence("storage quota exceeded".into()));
        }
        slot.data = Some(json);
        slot.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".into()
    }
}
