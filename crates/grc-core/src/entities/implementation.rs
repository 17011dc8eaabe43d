use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Effectiveness, ImplementationStatus};

/// A concrete way the organization satisfies one or more controls.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Implementation {
    pub id: String,
    pub code: String,
    pub title: String,
    pub details: String,
    pub notes: Option<String>,
    pub status: ImplementationStatus,
    /// Overwritten by the workflow when an audit covering it completes.
    pub effectiveness: Effectiveness,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
