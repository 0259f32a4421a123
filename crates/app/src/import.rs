//! Spreadsheet import boundary.
//!
//! Parsing the workbook itself is an external codec; this module validates
//! the row records it yields and normalizes them into domain inputs. Errors
//! carry the same user-facing row numbers the engine uses (line `i` is row
//! `i + 2`: 1-indexed display plus a header row).

use serde::{Deserialize, Serialize};

use labelstock_core::{Category, DomainError, DomainResult, LabelId};
use labelstock_inventory::{AdjustmentLine, display_row};

use crate::service::NewLabel;

/// One row of a bulk-transaction workbook.
///
/// Deltas are signed: positive for additions, negative for withdrawals.
/// Blank cells arrive as `None` and default to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub label_id: String,
    #[serde(default)]
    pub regular_delta: Option<i64>,
    #[serde(default)]
    pub sample_delta: Option<i64>,
}

/// One row of a bulk label-creation workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRow {
    pub category: String,
    pub name: String,
}

/// Validate transaction rows into engine lines.
pub fn adjustment_lines(rows: &[TransactionRow]) -> DomainResult<Vec<AdjustmentLine>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let label_id = row.label_id.trim();
            if label_id.is_empty() {
                return Err(DomainError::validation(format!(
                    "row {}: label id cannot be empty",
                    display_row(index)
                )));
            }
            Ok(AdjustmentLine::new(
                LabelId::new(label_id),
                row.regular_delta.unwrap_or(0),
                row.sample_delta.unwrap_or(0),
            ))
        })
        .collect()
}

/// Validate label rows into catalog inputs.
pub fn new_labels(rows: &[LabelRow]) -> DomainResult<Vec<NewLabel>> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let row_number = display_row(index);
            let name = row.name.trim();
            if name.is_empty() {
                return Err(DomainError::validation(format!(
                    "row {row_number}: label name cannot be empty"
                )));
            }
            let category = row.category.trim();
            if category.is_empty() {
                return Err(DomainError::validation(format!(
                    "row {row_number}: category cannot be empty"
                )));
            }
            let category = Category::parse(category).map_err(|_| {
                DomainError::validation(format!(
                    "row {row_number}: '{category}' is not a valid category"
                ))
            })?;
            Ok(NewLabel {
                name: name.to_string(),
                category,
            })
        })
        .collect()
}
