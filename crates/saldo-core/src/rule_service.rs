//! Services for recurring-rule lifecycle on a journal.

use uuid::Uuid;

use saldo_domain::{Frequency, Journal, RecurringRule};

use crate::CoreError;

/// Provides safe helpers for creating and cancelling recurring rules.
pub struct RuleService;

impl RuleService {
    /// Opts an existing transaction into recurrence, deriving a rule whose
    /// schedule starts one period after the transaction's date.
    pub fn adopt(
        journal: &mut Journal,
        transaction_id: Uuid,
        frequency: Frequency,
    ) -> Result<Uuid, CoreError> {
        let txn = journal
            .transaction(transaction_id)
            .ok_or(CoreError::TransactionNotFound(transaction_id))?;
        if txn.is_recurring() {
            return Err(CoreError::InvalidOperation(
                "transaction already originates from a rule".into(),
            ));
        }
        let rule = RecurringRule::from_instance(txn, frequency)
            .map_err(|err| CoreError::Validation(err.to_string()))?;
        Ok(journal.add_rule(rule))
    }

    /// Cancels a rule. Transactions it already posted are kept.
    pub fn cancel(journal: &mut Journal, rule_id: Uuid) -> Result<(), CoreError> {
        if journal.remove_rule(rule_id) {
            Ok(())
        } else {
            Err(CoreError::RuleNotFound(rule_id))
        }
    }
}
