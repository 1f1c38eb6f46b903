use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use saldo_domain::Journal;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing journals.
///
/// Implementations must apply a save atomically: a partially persisted
/// rollover (instances without the advanced rule pointers, or vice versa)
/// would re-trigger duplicate materialization on the next pass.
pub trait JournalStorage: Send + Sync {
    fn save_journal(&self, name: &str, journal: &Journal) -> Result<(), CoreError>;
    fn load_journal(&self, name: &str) -> Result<Journal, CoreError>;
    fn list_journals(&self) -> Result<Vec<String>, CoreError>;
    fn delete_journal(&self, name: &str) -> Result<(), CoreError>;
}

/// Detects dangling references and broken invariants within a journal
/// snapshot, typically after loading from an external store.
pub fn journal_warnings(journal: &Journal) -> Vec<String> {
    let rule_ids: HashSet<Uuid> = journal.rules.iter().map(|rule| rule.id).collect();
    let mut seen: HashMap<(Uuid, NaiveDate), usize> = HashMap::new();
    let mut warnings = Vec::new();

    for txn in &journal.transactions {
        let rule_id = match txn.source_rule {
            Some(id) => id,
            None => continue,
        };
        if !rule_ids.contains(&rule_id) {
            warnings.push(format!(
                "transaction {} references unknown rule {}",
                txn.id, rule_id
            ));
        }
        let count = seen.entry((rule_id, txn.date)).or_insert(0);
        *count += 1;
        if *count == 2 {
            warnings.push(format!(
                "rule {} materialized more than once on {}",
                rule_id, txn.date
            ));
        }
    }

    warnings
}
