pub mod ledger_store;
pub mod services;
pub mod time;
pub mod utils;

pub use ledger_store::{LedgerStore, LoadOutcome};
pub use time::{Clock, IdGenerator, ManualClock, SystemClock};
