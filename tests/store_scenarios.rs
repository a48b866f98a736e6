mod common;

use chrono::Duration;
use tracker_core::{
    core::{services::SummaryService, LedgerStore, LoadOutcome},
    ledger::{Ledger, NewTransaction, Transaction, TransactionId, TransactionKind},
    storage::{MemoryStorage, StorageBackend},
};

use common::{json_store, memory_store};

#[test]
fn salary_and_groceries_scenario() {
    let (mut store, _storage, clock) = memory_store();
    assert_eq!(store.summary().balance, 0.0);

    store
        .add(NewTransaction::income(1000.0).with_description("Salary"))
        .unwrap();
    clock.advance(Duration::seconds(5));
    let expense_id = store
        .add(NewTransaction::expense(300.0).with_description("Groceries"))
        .unwrap()
        .id;

    let summary = store.summary();
    assert_eq!(summary.total_income, 1000.0);
    assert_eq!(summary.total_expense, 300.0);
    assert_eq!(summary.balance, 700.0);
    assert_eq!(store.transactions().len(), 2);
    assert_eq!(store.transactions()[0].kind, TransactionKind::Expense);

    let removed = store.delete(expense_id).expect("expense exists");
    assert_eq!(removed.amount, 300.0);
    let summary = store.summary();
    assert_eq!(summary.total_expense, 0.0);
    assert_eq!(summary.balance, 1000.0);
    assert_eq!(store.transactions().len(), 1);
}

#[test]
fn delete_twice_matches_delete_once() {
    let (mut store, storage, _clock) = memory_store();
    let id = store.add(NewTransaction::income(10.0)).unwrap().id;
    store.add(NewTransaction::expense(4.0)).unwrap();

    assert!(store.delete(id).is_some());
    let after_first = store.ledger().clone();
    let writes = storage.write_count();

    assert!(store.delete(id).is_none());
    assert_eq!(store.ledger(), &after_first);
    assert_eq!(storage.write_count(), writes);
}

#[test]
fn fresh_ids_are_unique_and_dates_never_go_backwards() {
    let (mut store, _storage, clock) = memory_store();
    store.add(NewTransaction::income(1.0)).unwrap();
    // Same instant, then a clock that steps backwards.
    store.add(NewTransaction::income(2.0)).unwrap();
    clock.advance(Duration::minutes(-30));
    let newest = store.add(NewTransaction::expense(3.0)).unwrap().clone();

    let earlier: Vec<_> = store.transactions()[1..].to_vec();
    assert!(earlier.iter().all(|txn| txn.id != newest.id));
    assert!(earlier.iter().all(|txn| txn.date <= newest.date));
    assert_eq!(store.transactions()[0].id, newest.id);
}

#[test]
fn invalid_amounts_are_rejected_without_side_effects() {
    let (mut store, storage, _clock) = memory_store();
    for amount in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(store.add(NewTransaction::expense(amount)).is_err());
    }
    assert!(store.transactions().is_empty());
    assert_eq!(storage.write_count(), 0);

    store.add(NewTransaction::expense(0.0)).unwrap();
    assert_eq!(store.summary().total_expense, 0.0);
}

#[test]
fn summary_balance_is_income_minus_expense() {
    let (mut store, _storage, _clock) = memory_store();
    for (kind, amount) in [
        (TransactionKind::Income, 12.25),
        (TransactionKind::Expense, 40.0),
        (TransactionKind::Income, 3.75),
        (TransactionKind::Expense, 0.5),
    ] {
        store.add(NewTransaction::new(kind, amount)).unwrap();
    }
    let summary = store.summary();
    assert!(summary.total_income >= 0.0 && summary.total_expense >= 0.0);
    assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    assert_eq!(summary, SummaryService::compute(store.ledger()));
}

#[test]
fn memory_round_trip_preserves_order_and_fields() {
    let (mut store, storage, clock) = memory_store();
    store
        .add(NewTransaction::income(2500.0).with_description("Salary"))
        .unwrap();
    clock.advance(Duration::hours(1));
    store
        .add(
            NewTransaction::expense(42.1)
                .with_description("Dinner")
                .with_category("Food"),
        )
        .unwrap();

    let reopened = LedgerStore::with_system_clock(Box::new(storage.clone()));
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Restored(2));
    assert_eq!(reopened.ledger(), store.ledger());
    assert_eq!(reopened.summary(), store.summary());
}

#[test]
fn json_round_trip_preserves_order_and_fields() {
    let (mut store, storage, clock) = json_store(0);
    store
        .add(NewTransaction::income(100.0).with_description("Refund"))
        .unwrap();
    clock.advance(Duration::days(1));
    store
        .add(NewTransaction::expense(7.5).with_category("Transport"))
        .unwrap();

    let (ledger, dropped) = Ledger::from_transactions(storage.load().unwrap());
    assert!(dropped.is_empty());
    assert_eq!(&ledger, store.ledger());
}

#[test]
fn reopened_store_keeps_issuing_fresh_ids() {
    let (mut store, storage, _clock) = memory_store();
    let first = store.add(NewTransaction::income(5.0)).unwrap().id;

    // A clock far in the past must not reuse loaded ids.
    let past = std::sync::Arc::new(tracker_core::core::ManualClock::new(
        chrono::TimeZone::timestamp_millis_opt(&chrono::Utc, 0).unwrap(),
    ));
    let mut reopened = LedgerStore::initialize(Box::new(storage), Box::new(past));
    let second = reopened.add(NewTransaction::income(6.0)).unwrap().id;
    assert!(second > first);
    assert_ne!(second, TransactionId(0));
}

#[test]
fn corrupt_storage_starts_empty_and_recovers_on_next_save() {
    let storage = MemoryStorage::with_raw("{ not json");
    let mut store = LedgerStore::with_system_clock(Box::new(storage.clone()));
    assert!(matches!(store.load_outcome(), LoadOutcome::Recovered(_)));
    assert!(store.transactions().is_empty());

    store.add(NewTransaction::income(1.0)).unwrap();
    assert_eq!(storage.load().unwrap().len(), 1);
}

#[test]
fn rejected_writes_keep_the_session_in_memory() {
    let (mut store, storage, _clock) = memory_store();
    storage.reject_writes(true);
    store.add(NewTransaction::income(50.0)).unwrap();
    assert_eq!(store.summary().balance, 50.0);
    assert_eq!(storage.raw(), None);
}

fn full_precision_amounts(count: usize) -> Vec<f64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut amounts = vec![1175.4621790330661, 1865.8799244302274, 0.1 + 0.2];
    while amounts.len() < count {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
        amounts.push(unit * 10_000.0);
    }
    amounts
}

fn full_precision_transactions(count: usize) -> Vec<Transaction> {
    let start = chrono::TimeZone::timestamp_millis_opt(&chrono::Utc, 1_700_000_000_000).unwrap();
    full_precision_amounts(count)
        .into_iter()
        .enumerate()
        .rev()
        .map(|(idx, amount)| {
            Transaction::from_draft(
                NewTransaction::income(amount),
                TransactionId(start.timestamp_millis() + idx as i64),
                start + Duration::milliseconds(idx as i64),
            )
        })
        .collect()
}

fn assert_same_bits(saved: &[Transaction], loaded: &[Transaction]) {
    assert_eq!(saved.len(), loaded.len());
    for (before, after) in saved.iter().zip(loaded) {
        assert_eq!(
            before.amount.to_bits(),
            after.amount.to_bits(),
            "amount {} came back as {}",
            before.amount,
            after.amount
        );
    }
}

#[test]
fn full_precision_amounts_survive_memory_round_trip() {
    let transactions = full_precision_transactions(5_000);
    let storage = MemoryStorage::new();
    storage.save(&transactions).unwrap();
    assert_same_bits(&transactions, &storage.load().unwrap());
}

#[test]
fn full_precision_amounts_survive_file_round_trip() {
    let transactions = full_precision_transactions(5_000);
    let (_store, storage, _clock) = json_store(0);
    storage.save(&transactions).unwrap();
    assert_same_bits(&transactions, &storage.load().unwrap());

    let reopened = LedgerStore::with_system_clock(Box::new(storage));
    let (expected, _) = Ledger::from_transactions(transactions);
    assert_eq!(reopened.ledger(), &expected);
}

#[test]
fn stored_negative_amounts_are_dropped_on_load() {
    let storage = MemoryStorage::with_raw(
        r#"[{"id":1,"date":"2025-01-01T00:00:00Z","type":"INCOME","amount":-500,"description":"bad"}]"#,
    );
    let mut store = LedgerStore::with_system_clock(Box::new(storage));
    assert!(store.transactions().is_empty());
    let summary = store.summary();
    assert!(summary.total_income >= 0.0 && summary.total_expense >= 0.0);

    store.add(NewTransaction::income(5.0)).unwrap();
    assert_eq!(store.summary().total_income, 5.0);
}
