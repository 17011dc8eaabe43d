use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::StandardStatus;

/// A compliance framework (e.g. SOC 2, ISO 27001) grouping controls.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Standard {
    pub id: String,
    pub code: String,
    pub name: String,
    pub authority: Option<String>,
    pub description: Option<String>,
    pub status: StandardStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
