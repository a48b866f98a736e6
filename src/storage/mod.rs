pub mod json_backend;
pub mod memory;

use crate::{domain::transaction::Transaction, errors::Result};

/// Durable home for the full transaction sequence.
///
/// `load` returns an empty sequence when nothing has been stored yet and an
/// error when stored data is unreadable or corrupt. Callers decide how to
/// recover.
pub trait StorageBackend: Send + Sync {
    fn load(&self) -> Result<Vec<Transaction>>;
    fn save(&self, transactions: &[Transaction]) -> Result<()>;

    /// Short label used in diagnostics.
    fn describe(&self) -> String;
}

pub use json_backend::{load_transactions_from_path, save_transactions_to_path, BackupInfo, JsonStorage};
pub use memory::MemoryStorage;
