use std::cell::Cell;

use crate::core::services::{Summary, SummaryService, TransactionService};
use crate::core::time::{Clock, IdGenerator, SystemClock};
use crate::domain::common::Displayable;
use crate::domain::transaction::{NewTransaction, Transaction, TransactionId};
use crate::errors::Result;
use crate::ledger::Ledger;
use crate::storage::StorageBackend;

/// How the ledger came to hold its initial contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored data was read; holds the number of transactions kept.
    Restored(usize),
    /// Nothing was stored yet.
    Empty,
    /// Stored data could not be read; the ledger started empty.
    Recovered(String),
}

/// Owner of the in-memory ledger and the only place it is mutated.
///
/// Every successful mutation is mirrored to the storage backend. Storage
/// failures are logged and swallowed so the session carries on in memory.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    clock: Box<dyn Clock>,
    ids: IdGenerator,
    revision: u64,
    summary_cache: Cell<Option<(u64, Summary)>>,
    load_outcome: LoadOutcome,
}

impl LedgerStore {
    /// Builds a store from whatever the backend holds, starting empty on failure.
    pub fn initialize(storage: Box<dyn StorageBackend>, clock: Box<dyn Clock>) -> Self {
        let mut store = Self {
            ledger: Ledger::new(),
            storage,
            clock,
            ids: IdGenerator::new(),
            revision: 0,
            summary_cache: Cell::new(None),
            load_outcome: LoadOutcome::Empty,
        };
        store.reload();
        store
    }

    pub fn with_system_clock(storage: Box<dyn StorageBackend>) -> Self {
        Self::initialize(storage, Box::new(SystemClock))
    }

    /// Replaces the in-memory ledger with the backend's current contents.
    pub fn reload(&mut self) -> &LoadOutcome {
        let (ledger, outcome) = match self.storage.load() {
            Ok(transactions) if transactions.is_empty() => (Ledger::new(), LoadOutcome::Empty),
            Ok(transactions) => {
                let (transactions, invalid): (Vec<_>, Vec<_>) = transactions
                    .into_iter()
                    .partition(|txn| TransactionService::validate_stored(txn).is_ok());
                for txn in &invalid {
                    tracing::warn!(
                        id = %txn.id,
                        amount = txn.amount,
                        "dropped stored transaction with an invalid amount"
                    );
                }
                let (ledger, dropped) = Ledger::from_transactions(transactions);
                if !dropped.is_empty() {
                    tracing::warn!(
                        count = dropped.len(),
                        "dropped transactions with duplicate ids from stored data"
                    );
                }
                let count = ledger.len();
                (ledger, LoadOutcome::Restored(count))
            }
            Err(err) => {
                tracing::warn!(
                    storage = %self.storage.describe(),
                    error = %err,
                    "failed to load transactions; starting with an empty ledger"
                );
                (Ledger::new(), LoadOutcome::Recovered(err.to_string()))
            }
        };
        tracing::info!(
            storage = %self.storage.describe(),
            transactions = ledger.len(),
            "ledger loaded"
        );
        self.ids = IdGenerator::seeded(ledger.max_id());
        self.ledger = ledger;
        self.load_outcome = outcome;
        self.bump_revision();
        &self.load_outcome
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Transactions newest first.
    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.ledger.transaction(id)
    }

    /// Changes with every mutation or reload.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn storage_label(&self) -> String {
        self.storage.describe()
    }

    /// Records a new transaction at the front of the ledger.
    ///
    /// The creation date never precedes an existing entry's date, even if
    /// the clock has stepped backwards.
    pub fn add(&mut self, draft: NewTransaction) -> Result<&Transaction> {
        let now = match self.ledger.latest_date() {
            Some(latest) => self.clock.now().max(latest),
            None => self.clock.now(),
        };
        let transaction = TransactionService::create(draft, now, &mut self.ids)?;
        tracing::debug!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount = transaction.amount,
            "transaction added"
        );
        self.ledger.prepend(transaction);
        self.bump_revision();
        self.persist();
        Ok(&self.ledger.transactions()[0])
    }

    /// Removes the transaction with `id`. Unknown ids are a no-op.
    pub fn delete(&mut self, id: TransactionId) -> Option<Transaction> {
        let removed = self.ledger.remove_transaction(id)?;
        tracing::debug!(transaction = %removed.display_label(), "transaction deleted");
        self.bump_revision();
        self.persist();
        Some(removed)
    }

    /// Totals for the current ledger, recomputed only after a change.
    pub fn summary(&self) -> Summary {
        if let Some((revision, summary)) = self.summary_cache.get() {
            if revision == self.revision {
                return summary;
            }
        }
        let summary = SummaryService::compute(&self.ledger);
        self.summary_cache.set(Some((self.revision, summary)));
        summary
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(self.ledger.transactions()) {
            tracing::error!(
                storage = %self.storage.describe(),
                error = %err,
                "failed to persist transactions; continuing in memory"
            );
        }
    }
}
