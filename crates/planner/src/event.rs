use serde::{Deserialize, Serialize};

use labelstock_core::{DomainError, DomainResult, LabelId, PlanEventId};
use labelstock_inventory::AdjustmentLine;

/// Stock a planning event reserves for one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRequirement {
    pub label_id: LabelId,
    pub required_quantity: i64,
    pub required_sample_quantity: i64,
}

impl EventRequirement {
    pub fn new(label_id: LabelId, required_quantity: i64, required_sample_quantity: i64) -> Self {
        Self {
            label_id,
            required_quantity,
            required_sample_quantity,
        }
    }

    /// A requirement is meaningful only if at least one quantity is > 0.
    pub fn is_meaningful(&self) -> bool {
        self.required_quantity > 0 || self.required_sample_quantity > 0
    }
}

/// Event lifecycle. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Planning,
    Completed,
}

/// A named plan over a set of label requirements.
///
/// Requirements are editable only while `planning`; completion happens
/// through a successful withdrawal batch and is one-way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvent {
    id: PlanEventId,
    title: String,
    status: EventStatus,
    requirements: Vec<EventRequirement>,
}

impl PlanEvent {
    /// Create a new event in `planning` status.
    ///
    /// The title is trimmed and must be non-empty; zero-in-both-fields
    /// requirements are dropped before persisting.
    pub fn new(
        id: PlanEventId,
        title: impl Into<String>,
        requirements: Vec<EventRequirement>,
    ) -> DomainResult<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("event title cannot be empty"));
        }
        Ok(Self {
            id,
            title,
            status: EventStatus::Planning,
            requirements: Self::meaningful(requirements),
        })
    }

    fn meaningful(requirements: Vec<EventRequirement>) -> Vec<EventRequirement> {
        requirements
            .into_iter()
            .filter(EventRequirement::is_meaningful)
            .collect()
    }

    pub fn id(&self) -> PlanEventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == EventStatus::Completed
    }

    pub fn requirements(&self) -> &[EventRequirement] {
        &self.requirements
    }

    /// Full replace of title and requirements, allowed only while `planning`.
    pub fn replace_details(
        &mut self,
        title: impl Into<String>,
        requirements: Vec<EventRequirement>,
    ) -> DomainResult<()> {
        if self.is_completed() {
            return Err(DomainError::EventAlreadyCompleted);
        }
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation("event title cannot be empty"));
        }
        self.title = title;
        self.requirements = Self::meaningful(requirements);
        Ok(())
    }

    /// Flip to `completed`. Call only after the withdrawal batch committed.
    pub fn mark_completed(&mut self) {
        self.status = EventStatus::Completed;
    }

    /// One engine line per requirement, quantities negated for withdrawal.
    pub fn withdrawal_lines(&self) -> Vec<AdjustmentLine> {
        self.requirements
            .iter()
            .map(|req| {
                AdjustmentLine::new(
                    req.label_id.clone(),
                    -req.required_quantity,
                    -req.required_sample_quantity,
                )
            })
            .collect()
    }

    /// True if any requirement references `label_id`.
    pub fn references_label(&self, label_id: &LabelId) -> bool {
        self.requirements
            .iter()
            .any(|req| &req.label_id == label_id)
    }
}
