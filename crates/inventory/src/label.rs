use serde::{Deserialize, Serialize};

use labelstock_core::{Category, LabelId};

/// A catalog entry: one printed-label SKU and its current stock.
///
/// Invariant: `quantity` and `sample_quantity` never go negative. Quantities
/// are mutated only through the batch engine's commit; name and category only
/// through catalog administration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStock {
    pub id: LabelId,
    pub name: String,
    pub category: Category,
    pub quantity: i64,
    pub sample_quantity: i64,
}

impl LabelStock {
    pub fn new(
        id: LabelId,
        name: impl Into<String>,
        category: Category,
        quantity: i64,
        sample_quantity: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            quantity,
            sample_quantity,
        }
    }

    /// True while any regular or sample units remain.
    pub fn has_stock(&self) -> bool {
        self.quantity > 0 || self.sample_quantity > 0
    }
}
