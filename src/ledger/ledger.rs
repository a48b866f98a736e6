use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::transaction::{Transaction, TransactionId, TransactionKind};

/// Ordered collection of transactions, newest first.
///
/// Serialized as a bare JSON array. Ids are unique within a ledger; it is
/// only built through `from_transactions`, which drops duplicates, and the
/// mutators are crate-private so only the store can change the contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from an already ordered sequence, keeping the first
    /// occurrence of each id. Returns the ids that were discarded.
    pub fn from_transactions(transactions: Vec<Transaction>) -> (Self, Vec<TransactionId>) {
        let mut seen = HashSet::with_capacity(transactions.len());
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(transactions.len());
        for txn in transactions {
            if seen.insert(txn.id) {
                kept.push(txn);
            } else {
                dropped.push(txn.id);
            }
        }
        (Self { transactions: kept }, dropped)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn of_kind(&self, kind: TransactionKind) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |txn| txn.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        self.transaction(id).is_some()
    }

    /// Largest id present, used to seed id generation after a load.
    pub fn max_id(&self) -> Option<TransactionId> {
        self.transactions.iter().map(|txn| txn.id).max()
    }

    pub fn latest_date(&self) -> Option<DateTime<Utc>> {
        self.transactions.iter().map(|txn| txn.date).max()
    }

    pub(crate) fn prepend(&mut self, transaction: Transaction) {
        debug_assert!(!self.contains(transaction.id));
        self.transactions.insert(0, transaction);
    }

    pub(crate) fn remove_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
