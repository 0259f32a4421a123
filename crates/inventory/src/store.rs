use std::collections::BTreeMap;

use labelstock_core::LabelId;

use crate::label::LabelStock;

/// Authoritative mapping of label id to stock record.
///
/// Readers get references or a cloned [`snapshot`](Self::snapshot); the batch
/// engine commits through [`replace_all`](Self::replace_all). Catalog
/// administration inserts and removes whole records and edits name/category,
/// never quantities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryStore {
    labels: BTreeMap<LabelId, LabelStock>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(labels: impl IntoIterator<Item = LabelStock>) -> Self {
        Self {
            labels: labels
                .into_iter()
                .map(|label| (label.id.clone(), label))
                .collect(),
        }
    }

    pub fn get(&self, id: &LabelId) -> Option<&LabelStock> {
        self.labels.get(id)
    }

    pub fn get_mut(&mut self, id: &LabelId) -> Option<&mut LabelStock> {
        self.labels.get_mut(id)
    }

    pub fn contains(&self, id: &LabelId) -> bool {
        self.labels.contains_key(id)
    }

    /// All records, ordered by label id.
    pub fn iter(&self) -> impl Iterator<Item = &LabelStock> {
        self.labels.values()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Borrow the full mapping (the batch engine's snapshot input).
    pub fn records(&self) -> &BTreeMap<LabelId, LabelStock> {
        &self.labels
    }

    /// Cloned copy of the full mapping.
    pub fn snapshot(&self) -> BTreeMap<LabelId, LabelStock> {
        self.labels.clone()
    }

    /// Atomic commit: replace the whole mapping with an engine outcome.
    pub fn replace_all(&mut self, labels: BTreeMap<LabelId, LabelStock>) {
        self.labels = labels;
    }

    pub fn insert(&mut self, label: LabelStock) {
        self.labels.insert(label.id.clone(), label);
    }

    pub fn remove(&mut self, id: &LabelId) -> Option<LabelStock> {
        self.labels.remove(id)
    }
}
