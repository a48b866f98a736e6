#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use tracker_core::{
    core::{LedgerStore, ManualClock},
    storage::{JsonStorage, MemoryStorage},
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn test_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn fixed_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
    ))
}

/// Store backed by a fresh file in its own directory.
pub fn json_store(retention: usize) -> (LedgerStore, JsonStorage, Arc<ManualClock>) {
    let storage = JsonStorage::in_dir(Some(test_dir()), retention).expect("create json storage");
    let clock = fixed_clock();
    let store = LedgerStore::initialize(Box::new(storage.clone()), Box::new(clock.clone()));
    (store, storage, clock)
}

/// Store backed by an in-memory slot.
pub fn memory_store() -> (LedgerStore, MemoryStorage, Arc<ManualClock>) {
    let storage = MemoryStorage::new();
    let clock = fixed_clock();
    let store = LedgerStore::initialize(Box::new(storage.clone()), Box::new(clock.clone()));
    (store, storage, clock)
}
