//! Spreadsheet export boundary: event requirement reports.
//!
//! The external writer consumes one group per category; each row is the cell
//! sequence the warehouse checklist expects.

use std::collections::BTreeMap;

use serde::Serialize;

use labelstock_inventory::InventoryStore;
use labelstock_planner::{PlanEvent, deficit_report};

/// Marker cell emitted ahead of a sample quantity.
pub const SAMPLE_MARKER: &str = "SAMPLE";

/// Group title for requirements whose label no longer resolves.
const UNCATEGORIZED: &str = "UNCATEGORIZED";

/// One report row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementExportRow {
    pub required_quantity: i64,
    /// Uppercased for the printed checklist.
    pub label_name: String,
    /// Present only when the sample requirement is > 0.
    pub sample_quantity: Option<i64>,
}

impl RequirementExportRow {
    /// Cells for the external writer: an empty placeholder, the required
    /// quantity, the label name, then the sample marker and quantity when
    /// samples are required.
    pub fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            String::new(),
            self.required_quantity.to_string(),
            self.label_name.clone(),
        ];
        if let Some(sample) = self.sample_quantity {
            cells.push(SAMPLE_MARKER.to_string());
            cells.push(sample.to_string());
        }
        cells
    }
}

/// Report rows for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementExportGroup {
    /// Uppercased category title.
    pub category: String,
    pub rows: Vec<RequirementExportRow>,
}

/// Build the grouped requirement report for one event.
///
/// Rows are sorted by label name within each group; groups are ordered by
/// category title.
pub fn requirement_export(
    event: &PlanEvent,
    inventory: &InventoryStore,
) -> Vec<RequirementExportGroup> {
    let mut groups: BTreeMap<String, Vec<RequirementExportRow>> = BTreeMap::new();

    for row in deficit_report(event, inventory) {
        let category = row
            .category
            .map_or_else(|| UNCATEGORIZED.to_string(), |c| c.as_str().to_uppercase());
        groups.entry(category).or_default().push(RequirementExportRow {
            required_quantity: row.required_quantity,
            label_name: row.label_name.to_uppercase(),
            sample_quantity: (row.required_sample_quantity > 0)
                .then_some(row.required_sample_quantity),
        });
    }

    groups
        .into_iter()
        .map(|(category, rows)| RequirementExportGroup { category, rows })
        .collect()
}
