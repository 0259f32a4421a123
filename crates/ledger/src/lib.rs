//! `labelstock-ledger` — committed stock movements.
//!
//! [`Transaction`] records are immutable once committed; [`HistoryLedger`]
//! keeps them newest-first and append-only. The only writers are the batch
//! engine's commit step, the catalog's initial-stock entry, and the
//! name-propagation side effect of a label rename.

pub mod ledger;
pub mod transaction;

pub use ledger::HistoryLedger;
pub use transaction::{Transaction, TransactionKind};
