//! Pure domain models for the tracker. No I/O, no CLI, no storage.

pub mod common;
pub mod transaction;

pub use common::*;
pub use transaction::*;
