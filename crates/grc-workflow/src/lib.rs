//! # grc-workflow
//!
//! The audit lifecycle on top of `grc-db`.
//!
//! - [`wizard`]: staged audit creation (type, basic info, targets)
//! - [`engine`]: guarded `start`/`complete` transitions, the effectiveness
//!   cascade, report persistence and derived control effectiveness
//! - [`policy`]: who may take a transition
//! - [`render`]: report rendering seam and the plain-text renderer
//! - [`report_store`]: report files under the storage root
//!
//! Every engine operation runs behind one async write gate because all
//! repositories share a single libSQL connection.

pub mod engine;
pub mod error;
pub mod policy;
pub mod render;
pub mod report_store;
pub mod wizard;

pub use engine::{AvailableActions, RefusalReason, TransitionOutcome, WorkflowEngine, status_banner};
pub use error::WorkflowError;
pub use policy::{Decision, PermissionOracle, RolePolicy};
pub use render::{PlainTextRenderer, RenderError, ReportContext, ReportItem, ReportRenderer};
pub use report_store::ReportStore;
pub use wizard::{AuditDraft, AuditWizard, BasicInfo, CreateAuditInput};
