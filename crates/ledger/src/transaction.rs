use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelstock_core::{LabelId, TransactionId};

/// Direction of a committed stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Addition,
    Withdrawal,
}

/// An immutable record of one committed stock movement.
///
/// `label_name` is denormalized at commit time; a label rename rewrites it in
/// place (the ledger's one sanctioned mutation). `sample_quantity` is present
/// only when the movement touched samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub label_id: LabelId,
    pub label_name: String,
    pub kind: TransactionKind,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_quantity: Option<i64>,
    pub occurred_at: DateTime<Utc>,
}

impl Transaction {
    /// Build a record from movement magnitudes.
    ///
    /// `quantity` and `sample_quantity` are magnitudes (≥ 0); a zero sample
    /// magnitude is stored as `None`.
    pub fn new(
        label_id: LabelId,
        label_name: impl Into<String>,
        kind: TransactionKind,
        quantity: i64,
        sample_quantity: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: TransactionId::generate(),
            label_id,
            label_name: label_name.into(),
            kind,
            quantity,
            sample_quantity: (sample_quantity > 0).then_some(sample_quantity),
            occurred_at,
        }
    }
}
