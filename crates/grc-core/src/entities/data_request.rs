use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::DataRequestStatus;

/// A request for evidence raised against an audit item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DataRequest {
    pub id: String,
    pub audit_id: String,
    pub audit_item_id: String,
    pub created_by_id: String,
    pub assigned_to_id: Option<String>,
    pub details: String,
    pub status: DataRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An answer to a data request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DataRequestResponse {
    pub id: String,
    pub data_request_id: String,
    pub requester_id: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

/// A file supplied with a response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FileAttachment {
    pub id: String,
    pub data_request_response_id: String,
    pub file_name: String,
    pub file_path: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
