//! Data request repository: evidence requests, their responses, and the
//! files attached to responses.

use grc_core::activity_detail::StatusChangedDetail;
use grc_core::entities::{DataRequest, DataRequestResponse, FileAttachment};
use grc_core::enums::{ActivityAction, DataRequestStatus, EntityType};
use grc_core::errors::CoreError;
use grc_core::ids::{PREFIX_DATA_REQUEST, PREFIX_DATA_REQUEST_RESPONSE, PREFIX_FILE_ATTACHMENT};

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now, parse_datetime, parse_enum, to_detail};
use crate::service::GrcService;

const SELECT_COLS: &str = "id, audit_id, audit_item_id, created_by_id, assigned_to_id, details, \
     status, created_at, updated_at";
const RESPONSE_COLS: &str = "id, data_request_id, requester_id, response, created_at";
const ATTACHMENT_COLS: &str =
    "id, data_request_response_id, file_name, file_path, description, created_at";

/// Input for [`GrcService::create_data_request`].
#[derive(Debug, Clone)]
pub struct NewDataRequest {
    pub audit_item_id: String,
    pub assigned_to_id: Option<String>,
    pub details: String,
}

/// Input for [`GrcService::add_attachment`].
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub file_name: String,
    pub file_path: String,
    pub description: Option<String>,
}

fn row_to_data_request(row: &libsql::Row) -> Result<DataRequest, DatabaseError> {
    Ok(DataRequest {
        id: row.get(0)?,
        audit_id: row.get(1)?,
        audit_item_id: row.get(2)?,
        created_by_id: row.get(3)?,
        assigned_to_id: get_opt_string(row, 4)?,
        details: row.get(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

fn row_to_response(row: &libsql::Row) -> Result<DataRequestResponse, DatabaseError> {
    Ok(DataRequestResponse {
        id: row.get(0)?,
        data_request_id: row.get(1)?,
        requester_id: row.get(2)?,
        response: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

fn row_to_attachment(row: &libsql::Row) -> Result<FileAttachment, DatabaseError> {
    Ok(FileAttachment {
        id: row.get(0)?,
        data_request_response_id: row.get(1)?,
        file_name: row.get(2)?,
        file_path: row.get(3)?,
        description: get_opt_string(row, 4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl GrcService {
    /// Raise a data request against an audit item. The audit id is taken
    /// from the item.
    pub async fn create_data_request(
        &self,
        actor_id: &str,
        input: &NewDataRequest,
    ) -> Result<DataRequest, DatabaseError> {
        let item = self.get_audit_item(&input.audit_item_id).await?;
        let now = now();
        let id = self.db().generate_id(PREFIX_DATA_REQUEST).await?;
        let status = DataRequestStatus::Pending;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO data_requests ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    item.audit_id.as_str(),
                    item.id.as_str(),
                    actor_id,
                    input.assigned_to_id.as_deref(),
                    input.details.as_str(),
                    status.as_str(),
                    format_timestamp(now),
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(actor_id, EntityType::DataRequest, &id, ActivityAction::Created, None)
            .await?;

        Ok(DataRequest {
            id,
            audit_id: item.audit_id,
            audit_item_id: item.id,
            created_by_id: actor_id.to_string(),
            assigned_to_id: input.assigned_to_id.clone(),
            details: input.details.clone(),
            status,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_data_request(&self, id: &str) -> Result<DataRequest, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM data_requests WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_data_request(&row)
    }

    pub async fn list_data_requests_for_audit(
        &self,
        audit_id: &str,
    ) -> Result<Vec<DataRequest>, DatabaseError> {
        self.query_data_requests("audit_id", audit_id).await
    }

    pub async fn list_data_requests_for_item(
        &self,
        audit_item_id: &str,
    ) -> Result<Vec<DataRequest>, DatabaseError> {
        self.query_data_requests("audit_item_id", audit_item_id).await
    }

    async fn query_data_requests(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Vec<DataRequest>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM data_requests WHERE {column} = ?1
                     ORDER BY created_at, rowid"
                ),
                [value],
            )
            .await?;

        let mut requests = Vec::new();
        while let Some(row) = rows.next().await? {
            requests.push(row_to_data_request(&row)?);
        }
        Ok(requests)
    }

    /// Move a data request along its state machine.
    pub async fn transition_data_request(
        &self,
        actor_id: &str,
        id: &str,
        to: DataRequestStatus,
    ) -> Result<DataRequest, DatabaseError> {
        let current = self.get_data_request(id).await?;
        if !current.status.can_transition_to(to) {
            return Err(DatabaseError::InvalidState(
                CoreError::invalid_transition(EntityType::DataRequest.as_str(), id, current.status, to)
                    .to_string(),
            ));
        }

        self.db()
            .conn()
            .execute(
                "UPDATE data_requests SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![to.as_str(), format_timestamp(now()), id],
            )
            .await?;

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: to.as_str().to_string(),
            reason: None,
        };
        self.record_activity(
            actor_id,
            EntityType::DataRequest,
            id,
            ActivityAction::StatusChanged,
            Some(to_detail(&detail)?),
        )
        .await?;

        self.get_data_request(id).await
    }

    /// Answer a data request. The request moves to `responded`.
    pub async fn add_response(
        &self,
        actor_id: &str,
        data_request_id: &str,
        response: &str,
    ) -> Result<DataRequestResponse, DatabaseError> {
        self.transition_data_request(actor_id, data_request_id, DataRequestStatus::Responded)
            .await?;

        let now = now();
        let id = self.db().generate_id(PREFIX_DATA_REQUEST_RESPONSE).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO data_request_responses ({RESPONSE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
                libsql::params![
                    id.as_str(),
                    data_request_id,
                    actor_id,
                    response,
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(
            actor_id,
            EntityType::DataRequestResponse,
            &id,
            ActivityAction::Created,
            None,
        )
        .await?;

        Ok(DataRequestResponse {
            id,
            data_request_id: data_request_id.to_string(),
            requester_id: actor_id.to_string(),
            response: response.to_string(),
            created_at: now,
        })
    }

    pub async fn list_responses(
        &self,
        data_request_id: &str,
    ) -> Result<Vec<DataRequestResponse>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {RESPONSE_COLS} FROM data_request_responses
                     WHERE data_request_id = ?1 ORDER BY created_at, rowid"
                ),
                [data_request_id],
            )
            .await?;

        let mut responses = Vec::new();
        while let Some(row) = rows.next().await? {
            responses.push(row_to_response(&row)?);
        }
        Ok(responses)
    }

    pub async fn add_attachment(
        &self,
        actor_id: &str,
        response_id: &str,
        input: &NewAttachment,
    ) -> Result<FileAttachment, DatabaseError> {
        let now = now();
        let id = self.db().generate_id(PREFIX_FILE_ATTACHMENT).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO file_attachments ({ATTACHMENT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    response_id,
                    input.file_name.as_str(),
                    input.file_path.as_str(),
                    input.description.as_deref(),
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(
            actor_id,
            EntityType::FileAttachment,
            &id,
            ActivityAction::Created,
            None,
        )
        .await?;

        Ok(FileAttachment {
            id,
            data_request_response_id: response_id.to_string(),
            file_name: input.file_name.clone(),
            file_path: input.file_path.clone(),
            description: input.description.clone(),
            created_at: now,
        })
    }

    /// All attachments supplied across every response to a data request.
    pub async fn list_attachments(
        &self,
        data_request_id: &str,
    ) -> Result<Vec<FileAttachment>, DatabaseError> {
        let cols = ATTACHMENT_COLS
            .split(", ")
            .map(|c| format!("f.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {cols} FROM file_attachments f
                     JOIN data_request_responses r ON r.id = f.data_request_response_id
                     WHERE r.data_request_id = ?1 ORDER BY f.created_at, f.rowid"
                ),
                [data_request_id],
            )
            .await?;

        let mut attachments = Vec::new();
        while let Some(row) = rows.next().await? {
            attachments.push(row_to_attachment(&row)?);
        }
        Ok(attachments)
    }
}
