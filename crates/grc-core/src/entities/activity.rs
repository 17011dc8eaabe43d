use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ActivityAction, EntityType};

/// Append-only record of a mutation and the user who made it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ActivityEntry {
    pub id: String,
    pub actor_id: Option<String>,
    pub entity_type: EntityType,
    pub entity_id: String,
    pub action: ActivityAction,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
