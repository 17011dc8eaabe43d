//! Typed activity detail payloads.
//!
//! Each activity action can carry a structured `detail` JSON blob. These
//! types give the common shapes a schema.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Effectiveness;

/// Detail for `ActivityAction::StatusChanged`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: String,
    pub to: String,
    pub reason: Option<String>,
}

/// Detail for `ActivityAction::EffectivenessCascaded`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EffectivenessCascadedDetail {
    pub audit_id: String,
    pub audit_item_id: String,
    pub from: Effectiveness,
    pub to: Effectiveness,
}

/// Detail for `ActivityAction::ReportPersisted`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportPersistedDetail {
    pub template: String,
    pub path: String,
    pub bytes: u64,
}

/// Detail for `ActivityAction::Linked`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LinkedDetail {
    pub source_type: String,
    pub source_id: String,
    pub target_type: String,
    pub target_id: String,
}
