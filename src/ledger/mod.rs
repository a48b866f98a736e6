#[allow(clippy::module_inception)]
pub mod ledger;

pub use crate::domain::transaction::{NewTransaction, Transaction, TransactionId, TransactionKind};
pub use ledger::Ledger;
