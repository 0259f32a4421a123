//! The process-wide inventory controller.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use labelstock_core::{Category, DomainError, DomainResult, LabelId, PlanEventId};
use labelstock_inventory::{AdjustmentLine, InventoryStore, LabelStock, apply_batch};
use labelstock_ledger::{HistoryLedger, Transaction, TransactionKind};
use labelstock_planner::{
    EventRequirement, EventStatus, PlanEvent, RequirementDeficit, deficit_report,
};

/// Receipt for a committed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Input lines processed (zero-delta lines included).
    pub processed: usize,
}

impl core::fmt::Display for BatchReceipt {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "processed {} transaction(s) successfully", self.processed)
    }
}

/// Input for creating a catalog entry without stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLabel {
    pub name: String,
    pub category: Category,
}

/// Owns all application state: inventory, history, and planning events.
///
/// Constructed at startup (optionally with seed labels), torn down at process
/// exit. All mutation goes through `&mut self`, which makes the
/// single-writer requirement a compile-time property.
#[derive(Debug, Default)]
pub struct InventoryService {
    store: InventoryStore,
    ledger: HistoryLedger,
    events: Vec<PlanEvent>,
}

impl InventoryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(labels: impl IntoIterator<Item = LabelStock>) -> Self {
        Self {
            store: InventoryStore::with_labels(labels),
            ledger: HistoryLedger::new(),
            events: Vec::new(),
        }
    }

    // ---- reads -----------------------------------------------------------

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    pub fn labels(&self) -> impl Iterator<Item = &LabelStock> {
        self.store.iter()
    }

    pub fn label(&self, id: &LabelId) -> Option<&LabelStock> {
        self.store.get(id)
    }

    /// Full transaction history, newest first.
    pub fn history(&self) -> &[Transaction] {
        self.ledger.entries()
    }

    /// All planning events, newest first.
    pub fn events(&self) -> &[PlanEvent] {
        &self.events
    }

    pub fn event(&self, id: PlanEventId) -> Option<&PlanEvent> {
        self.events.iter().find(|e| e.id() == id)
    }

    // ---- batch engine call sites ----------------------------------------

    /// Validate and commit a batch of adjustment lines.
    ///
    /// All-or-nothing: on any line failure nothing is committed and the
    /// error is returned as-is.
    pub fn apply_batch(
        &mut self,
        lines: &[AdjustmentLine],
        now: DateTime<Utc>,
    ) -> DomainResult<BatchReceipt> {
        let outcome = apply_batch(self.store.records(), lines, now)?;
        let receipt = BatchReceipt {
            processed: outcome.processed,
        };
        self.store.replace_all(outcome.inventory);
        self.ledger.record_batch(outcome.transactions);
        tracing::info!(processed = receipt.processed, "batch committed");
        Ok(receipt)
    }

    /// Ad-hoc single movement: a one-row batch through the same engine.
    ///
    /// `quantity` and `sample_quantity` are magnitudes; the kind determines
    /// the sign.
    pub fn record_transaction(
        &mut self,
        label_id: &LabelId,
        kind: TransactionKind,
        quantity: i64,
        sample_quantity: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<BatchReceipt> {
        if quantity < 0 || sample_quantity < 0 {
            return Err(DomainError::validation("quantities cannot be negative"));
        }
        if quantity == 0 && sample_quantity == 0 {
            return Err(DomainError::validation(
                "at least one quantity must be greater than zero",
            ));
        }
        let (regular_delta, sample_delta) = match kind {
            TransactionKind::Addition => (quantity, sample_quantity),
            TransactionKind::Withdrawal => (-quantity, -sample_quantity),
        };
        self.apply_batch(
            &[AdjustmentLine::new(label_id.clone(), regular_delta, sample_delta)],
            now,
        )
    }

    /// Bulk transactions from the spreadsheet boundary.
    pub fn import_transactions(
        &mut self,
        rows: &[crate::import::TransactionRow],
        now: DateTime<Utc>,
    ) -> DomainResult<BatchReceipt> {
        let lines = crate::import::adjustment_lines(rows)?;
        self.apply_batch(&lines, now)
    }

    // ---- catalog administration ------------------------------------------

    /// Create one label, optionally with initial stock.
    ///
    /// Initial stock is recorded as a single `addition` directly on the
    /// ledger; there is no prior stock for the engine to validate against.
    pub fn add_label(
        &mut self,
        name: &str,
        category: Category,
        initial_quantity: i64,
        initial_sample_quantity: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<LabelId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("label name cannot be empty"));
        }
        if initial_quantity < 0 || initial_sample_quantity < 0 {
            return Err(DomainError::validation(
                "initial quantities cannot be negative",
            ));
        }

        let id = LabelId::generate();
        if initial_quantity > 0 || initial_sample_quantity > 0 {
            self.ledger.record(Transaction::new(
                id.clone(),
                name,
                TransactionKind::Addition,
                initial_quantity,
                initial_sample_quantity,
                now,
            ));
        }
        self.store.insert(LabelStock::new(
            id.clone(),
            name,
            category,
            initial_quantity,
            initial_sample_quantity,
        ));
        Ok(id)
    }

    /// Create many labels with zero stock, skipping duplicate names.
    ///
    /// Names are matched case-insensitively against the existing catalog and
    /// against names added earlier in the same batch; duplicates are skipped
    /// silently. Returns the number of labels added.
    pub fn batch_add_labels(&mut self, labels: Vec<NewLabel>) -> usize {
        let mut seen: HashSet<String> =
            self.store.iter().map(|l| l.name.to_lowercase()).collect();

        let mut added = 0;
        for label in labels {
            let key = label.name.to_lowercase();
            if !seen.insert(key) {
                tracing::warn!(name = %label.name, "skipping duplicate label name");
                continue;
            }
            self.store.insert(LabelStock::new(
                LabelId::generate(),
                label.name,
                label.category,
                0,
                0,
            ));
            added += 1;
        }
        added
    }

    /// Bulk label creation from the spreadsheet boundary.
    pub fn import_labels(&mut self, rows: &[crate::import::LabelRow]) -> DomainResult<usize> {
        let labels = crate::import::new_labels(rows)?;
        Ok(self.batch_add_labels(labels))
    }

    /// Rename and/or recategorize a label.
    ///
    /// The new name is propagated onto every history entry for the label so
    /// the ledger keeps displaying consistently.
    pub fn rename_label(
        &mut self,
        label_id: &LabelId,
        new_name: &str,
        new_category: Category,
    ) -> DomainResult<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(DomainError::validation("label name cannot be empty"));
        }
        let Some(label) = self.store.get_mut(label_id) else {
            return Err(DomainError::LabelNotFound);
        };
        label.name = new_name.to_string();
        label.category = new_category;
        self.ledger.propagate_rename(label_id, new_name);
        Ok(())
    }

    /// Remove a label from the catalog.
    ///
    /// Blocked while the label holds stock or while any planning-status event
    /// requires it. History entries keep their denormalized name and id.
    pub fn delete_label(&mut self, label_id: &LabelId) -> DomainResult<()> {
        let Some(label) = self.store.get(label_id) else {
            return Err(DomainError::LabelNotFound);
        };
        if label.has_stock() {
            return Err(DomainError::LabelHasStock);
        }
        let required_by_planning_event = self.events.iter().any(|event| {
            event.status() == EventStatus::Planning && event.references_label(label_id)
        });
        if required_by_planning_event {
            return Err(DomainError::LabelInUseByPlanningEvent);
        }
        self.store.remove(label_id);
        Ok(())
    }

    // ---- event planning --------------------------------------------------

    /// Create a planning event. Newest events list first.
    pub fn create_event(
        &mut self,
        title: &str,
        requirements: Vec<EventRequirement>,
    ) -> DomainResult<PlanEventId> {
        let event = PlanEvent::new(PlanEventId::generate(), title, requirements)?;
        let id = event.id();
        self.events.insert(0, event);
        Ok(id)
    }

    /// Replace an event's title and requirements.
    ///
    /// A missing event is a silent no-op; editing a completed event is
    /// rejected.
    pub fn edit_event(
        &mut self,
        event_id: PlanEventId,
        title: &str,
        requirements: Vec<EventRequirement>,
    ) -> DomainResult<()> {
        match self.events.iter_mut().find(|e| e.id() == event_id) {
            Some(event) => event.replace_details(title, requirements),
            None => Ok(()),
        }
    }

    /// Complete an event by withdrawing all of its requirements.
    ///
    /// The withdrawal is one batch: if any requirement exceeds current stock
    /// the engine rejects it, the event stays in `planning`, and no inventory
    /// or ledger change is observable.
    pub fn complete_event(
        &mut self,
        event_id: PlanEventId,
        now: DateTime<Utc>,
    ) -> DomainResult<BatchReceipt> {
        let index = self
            .events
            .iter()
            .position(|e| e.id() == event_id)
            .ok_or(DomainError::EventNotFound)?;
        if self.events[index].is_completed() {
            return Err(DomainError::EventAlreadyCompleted);
        }

        let lines = self.events[index].withdrawal_lines();
        let receipt = self.apply_batch(&lines, now)?;
        self.events[index].mark_completed();
        tracing::info!(event_id = %event_id, "event completed");
        Ok(receipt)
    }

    /// Read-only shortage analysis for one event.
    pub fn event_deficits(&self, event_id: PlanEventId) -> DomainResult<Vec<RequirementDeficit>> {
        let event = self.event(event_id).ok_or(DomainError::EventNotFound)?;
        Ok(deficit_report(event, &self.store))
    }
}
