use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Applicability;

/// A requirement of a standard.
///
/// Controls carry no stored effectiveness: it is derived from the latest
/// completed audit item that targets the control.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub standard_id: String,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Applicability,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
