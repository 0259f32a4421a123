//! `labelstock-planner` — planning events that reserve stock against future
//! requirements.
//!
//! A [`PlanEvent`] moves `planning → completed` exactly once, driven by a
//! successful withdrawal batch of all its requirements. Deficit analysis is a
//! read-only view for the planning stage.

pub mod deficit;
pub mod event;

pub use deficit::{RequirementDeficit, deficit_report};
pub use event::{EventRequirement, EventStatus, PlanEvent};
