//! Read-only shortage analysis for the planning stage.

use serde::Serialize;

use labelstock_core::{Category, LabelId};
use labelstock_inventory::InventoryStore;

use crate::event::PlanEvent;

/// Fallback display name for requirements whose label no longer resolves.
const UNKNOWN_LABEL: &str = "unknown label";

/// One requirement annotated with current stock and per-field deficits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementDeficit {
    pub label_id: LabelId,
    pub label_name: String,
    pub category: Option<Category>,
    pub required_quantity: i64,
    pub current_quantity: i64,
    pub unit_deficit: i64,
    pub required_sample_quantity: i64,
    pub current_sample_quantity: i64,
    pub sample_deficit: i64,
}

impl RequirementDeficit {
    /// Zero deficit on both fields: fully satisfiable today.
    pub fn is_satisfiable(&self) -> bool {
        self.unit_deficit == 0 && self.sample_deficit == 0
    }
}

/// Compute per-requirement deficits against current inventory.
///
/// `deficit = max(0, required - current)`, independently for regular and
/// sample quantities. Rows are sorted by label name; labels that no longer
/// resolve get a fallback name and no category.
pub fn deficit_report(event: &PlanEvent, inventory: &InventoryStore) -> Vec<RequirementDeficit> {
    let mut rows: Vec<RequirementDeficit> = event
        .requirements()
        .iter()
        .map(|req| {
            let stock = inventory.get(&req.label_id);
            let current_quantity = stock.map_or(0, |s| s.quantity);
            let current_sample_quantity = stock.map_or(0, |s| s.sample_quantity);
            RequirementDeficit {
                label_id: req.label_id.clone(),
                label_name: stock.map_or_else(|| UNKNOWN_LABEL.to_string(), |s| s.name.clone()),
                category: stock.map(|s| s.category),
                required_quantity: req.required_quantity,
                current_quantity,
                unit_deficit: (req.required_quantity - current_quantity).max(0),
                required_sample_quantity: req.required_sample_quantity,
                current_sample_quantity,
                sample_deficit: (req.required_sample_quantity - current_sample_quantity).max(0),
            }
        })
        .collect();

    rows.sort_by(|a, b| a.label_name.cmp(&b.label_name));
    rows
}
