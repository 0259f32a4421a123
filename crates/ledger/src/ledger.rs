use labelstock_core::LabelId;

use crate::transaction::Transaction;

/// Append-only log of committed transactions, newest first.
///
/// Entries are never removed or reordered after commit. A label rename
/// rewrites `label_name` on matching entries; that is the only in-place
/// mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLedger {
    entries: Vec<Transaction>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<Transaction>) -> Self {
        Self { entries }
    }

    /// Newest-first view of the full history.
    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend a single transaction.
    pub fn record(&mut self, transaction: Transaction) {
        self.entries.insert(0, transaction);
    }

    /// Commit a batch of transactions synthesized in processing order.
    ///
    /// The batch lands ahead of existing history in reverse processing order:
    /// given history `[old...]` and a batch `[a, b, c]`, the ledger becomes
    /// `[c, b, a, old...]`.
    pub fn record_batch(&mut self, mut transactions: Vec<Transaction>) {
        transactions.reverse();
        transactions.append(&mut self.entries);
        self.entries = transactions;
    }

    /// Rewrite the denormalized label name on every entry for `label_id`.
    ///
    /// Keeps history display consistent after a rename; no new transaction is
    /// created.
    pub fn propagate_rename(&mut self, label_id: &LabelId, new_name: &str) {
        for tx in self.entries.iter_mut().filter(|tx| &tx.label_id == label_id) {
            tx.label_name = new_name.to_string();
        }
    }
}
