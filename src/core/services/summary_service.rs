use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::transaction::TransactionKind;
use crate::ledger::Ledger;

/// Aggregate totals over a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
}

/// Total for one category label within a single transaction kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Option<String>,
    pub total: f64,
    pub count: usize,
}

pub struct SummaryService;

impl SummaryService {
    /// Sums income and expense amounts; an empty ledger yields all zeros.
    pub fn compute(ledger: &Ledger) -> Summary {
        let total_income: f64 = ledger
            .of_kind(TransactionKind::Income)
            .map(|txn| txn.amount)
            .sum();
        let total_expense: f64 = ledger
            .of_kind(TransactionKind::Expense)
            .map(|txn| txn.amount)
            .sum();
        Summary {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Per-category totals for `kind`, largest first. Uncategorized entries
    /// are grouped under `None`.
    pub fn by_category(ledger: &Ledger, kind: TransactionKind) -> Vec<CategoryTotal> {
        let mut groups: BTreeMap<Option<String>, (f64, usize)> = BTreeMap::new();
        for txn in ledger.of_kind(kind) {
            let entry = groups.entry(txn.category.clone()).or_insert((0.0, 0));
            entry.0 += txn.amount;
            entry.1 += 1;
        }
        let mut totals: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category,
                total,
                count,
            })
            .collect();
        totals.sort_by(|a, b| b.total.total_cmp(&a.total));
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::{NewTransaction, Transaction, TransactionId};
    use chrono::{TimeZone, Utc};

    fn ledger_of(drafts: Vec<NewTransaction>) -> Ledger {
        let transactions = drafts
            .into_iter()
            .enumerate()
            .map(|(idx, draft)| {
                let id = TransactionId(idx as i64 + 1);
                let date = Utc.timestamp_millis_opt(id.value()).unwrap();
                Transaction::from_draft(draft, id, date)
            })
            .collect();
        Ledger::from_transactions(transactions).0
    }

    #[test]
    fn empty_ledger_is_all_zero() {
        assert_eq!(SummaryService::compute(&Ledger::new()), Summary::default());
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let ledger = ledger_of(vec![
            NewTransaction::income(1000.0),
            NewTransaction::expense(300.0),
            NewTransaction::expense(50.25),
            NewTransaction::income(20.0),
        ]);
        let summary = SummaryService::compute(&ledger);
        assert_eq!(summary.total_income, 1020.0);
        assert_eq!(summary.total_expense, 350.25);
        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    }

    #[test]
    fn balance_goes_negative_when_expenses_dominate() {
        let ledger = ledger_of(vec![NewTransaction::expense(80.0)]);
        let summary = SummaryService::compute(&ledger);
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.balance, -80.0);
    }

    #[test]
    fn by_category_groups_and_orders_totals() {
        let ledger = ledger_of(vec![
            NewTransaction::expense(10.0).with_category("Food"),
            NewTransaction::expense(40.0).with_category("Rent"),
            NewTransaction::expense(15.0).with_category("Food"),
            NewTransaction::expense(5.0),
            NewTransaction::income(500.0).with_category("Salary"),
        ]);
        let totals = SummaryService::by_category(&ledger, TransactionKind::Expense);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].category.as_deref(), Some("Rent"));
        assert_eq!(totals[1].category.as_deref(), Some("Food"));
        assert_eq!(totals[1].total, 25.0);
        assert_eq!(totals[1].count, 2);
        assert_eq!(totals[2].category, None);
    }
}
