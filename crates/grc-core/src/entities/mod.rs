//! Entity structs for all audit-workflow domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `grc-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.

mod activity;
mod audit;
mod audit_item;
mod control;
mod data_request;
mod implementation;
mod standard;

pub use activity::ActivityEntry;
pub use audit::Audit;
pub use audit_item::{AuditItem, Auditable};
pub use control::Control;
pub use data_request::{DataRequest, DataRequestResponse, FileAttachment};
pub use implementation::Implementation;
pub use standard::Standard;
