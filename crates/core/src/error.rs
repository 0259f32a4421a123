//! Domain error model.

use thiserror::Error;

use crate::id::LabelId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable and user-facing; callers report the message
/// and leave the system in its prior state. Batch variants carry the
/// offending spreadsheet row (1-indexed display plus a header row, so input
/// line `i` is row `i + 2`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (empty name, bad import column, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A batch line referenced a label id that does not exist.
    #[error("row {row}: no label with id '{label_id}' exists")]
    UnknownLabel { row: usize, label_id: LabelId },

    /// A withdrawal would drive the regular quantity negative.
    #[error(
        "row {row}: insufficient regular stock for '{label_name}': attempted to withdraw {attempted}, only {available} available"
    )]
    InsufficientRegularStock {
        row: usize,
        label_name: String,
        attempted: i64,
        available: i64,
    },

    /// A withdrawal would drive the sample quantity negative.
    #[error(
        "row {row}: insufficient sample stock for '{label_name}': attempted to withdraw {attempted}, only {available} available"
    )]
    InsufficientSampleStock {
        row: usize,
        label_name: String,
        attempted: i64,
        available: i64,
    },

    /// No event with the requested id.
    #[error("event not found")]
    EventNotFound,

    /// The event has already been completed; the transition is terminal.
    #[error("event has already been completed")]
    EventAlreadyCompleted,

    /// No label with the requested id.
    #[error("label not found")]
    LabelNotFound,

    /// Deletion blocked: the label still holds regular or sample stock.
    #[error("label still has stock; withdraw all units and samples first")]
    LabelHasStock,

    /// Deletion blocked: a planning-status event references the label.
    #[error("label is required by an event still in planning")]
    LabelInUseByPlanningEvent,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
