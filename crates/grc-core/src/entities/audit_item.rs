use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Applicability, AuditableKind, Effectiveness, WorkflowStatus};

/// Polymorphic reference from an audit item to the entity it evaluates.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Auditable {
    pub kind: AuditableKind,
    pub id: String,
}

impl Auditable {
    #[must_use]
    pub fn control(id: impl Into<String>) -> Self {
        Self {
            kind: AuditableKind::Control,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn implementation(id: impl Into<String>) -> Self {
        Self {
            kind: AuditableKind::Implementation,
            id: id.into(),
        }
    }
}

/// One evaluated target within an audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditItem {
    pub id: String,
    pub audit_id: String,
    /// Owning user, the audit manager at creation time.
    pub user_id: String,
    pub status: WorkflowStatus,
    pub applicability: Applicability,
    pub effectiveness: Effectiveness,
    pub auditor_notes: Option<String>,
    pub auditable: Auditable,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
