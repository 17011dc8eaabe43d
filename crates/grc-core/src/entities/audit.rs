use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AuditType, WorkflowStatus};

/// A bounded compliance review over a set of controls or implementations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Audit {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub manager_id: String,
    /// Set for `standards` audits only.
    pub standard_id: Option<String>,
    pub audit_type: AuditType,
    pub status: WorkflowStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
