//! Business logic helpers for creating transactions.

use chrono::{DateTime, Utc};

use crate::core::time::IdGenerator;
use crate::domain::transaction::{NewTransaction, Transaction};
use crate::errors::{LedgerError, Result};

/// Validates drafts and stamps them with an id and creation date.
pub struct TransactionService;

impl TransactionService {
    /// Rejects amounts that are negative, NaN or infinite. Zero is allowed.
    pub fn validate(draft: &NewTransaction) -> Result<()> {
        validate_amount(draft.amount)
    }

    /// Applies the same amount rules to a transaction read back from storage.
    pub fn validate_stored(transaction: &Transaction) -> Result<()> {
        validate_amount(transaction.amount)
    }

    /// Validates `draft` and stamps it as created at `now`.
    pub fn create(
        draft: NewTransaction,
        now: DateTime<Utc>,
        ids: &mut IdGenerator,
    ) -> Result<Transaction> {
        Self::validate(&draft)?;
        let NewTransaction {
            kind,
            amount,
            description,
            category,
        } = draft;
        let draft = NewTransaction {
            kind,
            // -0.0 becomes 0.0.
            amount: amount + 0.0,
            description: description.trim().to_string(),
            category: category
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        };
        let id = ids.next_id(now);
        Ok(Transaction::from_draft(draft, id, now))
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(LedgerError::Validation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn create_stamps_id_and_date() {
        let mut ids = IdGenerator::new();
        let txn = TransactionService::create(
            NewTransaction::income(250.0).with_description("  Salary  "),
            now(),
            &mut ids,
        )
        .unwrap();
        assert_eq!(txn.date, now());
        assert_eq!(txn.id.value(), now().timestamp_millis());
        assert_eq!(txn.description, "Salary");
    }

    #[test]
    fn rejects_negative_amounts() {
        let err = TransactionService::validate(&NewTransaction::expense(-1.0))
            .expect_err("negative amount must fail");
        assert!(
            matches!(err, LedgerError::Validation(ref message) if message.contains("negative")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn rejects_non_finite_amounts() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(TransactionService::validate(&NewTransaction::income(amount)).is_err());
        }
    }

    #[test]
    fn accepts_zero_and_normalizes_negative_zero() {
        let mut ids = IdGenerator::new();
        let txn =
            TransactionService::create(NewTransaction::expense(-0.0), now(), &mut ids).unwrap();
        assert!(txn.amount.is_sign_positive());
    }
}
