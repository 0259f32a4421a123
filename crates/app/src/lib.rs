//! `labelstock-app` — the process-wide inventory controller and its external
//! boundaries.
//!
//! [`InventoryService`] owns the store, the ledger, and the event list for
//! one process; every mutating operation takes `&mut self`, so the
//! at-most-one-writer contract is enforced by the borrow checker. A
//! concurrent embedding wraps the service in a single writer lock or
//! serializes calls through one task.
//!
//! The spreadsheet codec is an external collaborator: [`import`] validates
//! its row records into engine lines, [`export`] produces the grouped
//! requirement report it writes back out.

pub mod export;
pub mod import;
pub mod service;
pub mod telemetry;


pub use export::{RequirementExportGroup, RequirementExportRow, requirement_export};
pub use import::{LabelRow, TransactionRow};
pub use service::{BatchReceipt, InventoryService, NewLabel};
