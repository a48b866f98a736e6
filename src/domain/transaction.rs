//! Domain models for income and expense transactions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;

/// Identifier derived from the creation timestamp in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub i64);

impl TransactionId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(TransactionId)
    }
}

/// Direction of a transaction relative to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown transaction type `{}` (expected income or expense)", self.0)
    }
}

impl std::error::Error for ParseKindError {}

impl FromStr for TransactionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionKind::Income),
            "expense" | "out" => Ok(TransactionKind::Expense),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// A single recorded income or expense entry.
///
/// `id` and `date` are assigned by the store when the entry is added and
/// never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Transaction {
    /// Stamps a draft with its identity and creation time.
    pub fn from_draft(draft: NewTransaction, id: TransactionId, date: DateTime<Utc>) -> Self {
        Self {
            id,
            date,
            kind: draft.kind,
            amount: draft.amount,
            description: draft.description,
            category: draft.category,
        }
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        if self.description.is_empty() {
            format!("txn:{} [{}]", self.id, self.kind)
        } else {
            format!("txn:{} [{}] {}", self.id, self.kind, self.description)
        }
    }
}

/// Caller-supplied fields of a transaction, before `id` and `date` exist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category: Option<String>,
}

impl NewTransaction {
    pub fn new(kind: TransactionKind, amount: f64) -> Self {
        Self {
            kind,
            amount,
            description: String::new(),
            category: None,
        }
    }

    pub fn income(amount: f64) -> Self {
        Self::new(TransactionKind::Income, amount)
    }

    pub fn expense(amount: f64) -> Self {
        Self::new(TransactionKind::Expense, amount)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Transaction {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        Transaction::from_draft(
            NewTransaction::expense(12.5)
                .with_description("Lunch")
                .with_category("Food"),
            TransactionId(1_709_285_400_000),
            date,
        )
    }

    #[test]
    fn serializes_with_upper_case_type_key() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "EXPENSE");
        assert_eq!(json["id"], 1_709_285_400_000_i64);
        assert_eq!(json["category"], "Food");
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let raw = r#"{"id":5,"date":"2024-03-01T09:30:00Z","type":"INCOME","amount":100}"#;
        let txn: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(txn.id, TransactionId(5));
        assert_eq!(txn.kind, TransactionKind::Income);
        assert!(txn.description.is_empty());
        assert!(txn.category.is_none());
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("INCOME".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!("Expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn blank_category_is_dropped() {
        let draft = NewTransaction::income(1.0).with_category("   ");
        assert!(draft.category.is_none());
    }

    #[test]
    fn display_label_includes_kind_and_description() {
        let txn = sample();
        assert_eq!(txn.display_label(), "txn:1709285400000 [Expense] Lunch");
    }
}
