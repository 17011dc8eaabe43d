//! Standard repository.

use grc_core::activity_detail::StatusChangedDetail;
use grc_core::entities::Standard;
use grc_core::enums::{ActivityAction, EntityType, StandardStatus};
use grc_core::ids::PREFIX_STANDARD;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now, parse_datetime, parse_enum, to_detail};
use crate::service::GrcService;

const SELECT_COLS: &str = "id, code, name, authority, description, status, created_at, updated_at";

/// Input for [`GrcService::create_standard`].
#[derive(Debug, Clone)]
pub struct NewStandard {
    pub code: String,
    pub name: String,
    pub authority: Option<String>,
    pub description: Option<String>,
    pub status: StandardStatus,
}

fn row_to_standard(row: &libsql::Row) -> Result<Standard, DatabaseError> {
    Ok(Standard {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        authority: get_opt_string(row, 3)?,
        description: get_opt_string(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl GrcService {
    pub async fn create_standard(
        &self,
        actor_id: &str,
        input: &NewStandard,
    ) -> Result<Standard, DatabaseError> {
        let now = now();
        let id = self.db().generate_id(PREFIX_STANDARD).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO standards ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                libsql::params![
                    id.as_str(),
                    input.code.as_str(),
                    input.name.as_str(),
                    input.authority.as_deref(),
                    input.description.as_deref(),
                    input.status.as_str(),
                    format_timestamp(now),
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(actor_id, EntityType::Standard, &id, ActivityAction::Created, None)
            .await?;

        Ok(Standard {
            id,
            code: input.code.clone(),
            name: input.name.clone(),
            authority: input.authority.clone(),
            description: input.description.clone(),
            status: input.status,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_standard(&self, id: &str) -> Result<Standard, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM standards WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_standard(&row)
    }

    /// List standards, optionally only those with the given status.
    pub async fn list_standards(
        &self,
        status: Option<StandardStatus>,
        limit: u32,
    ) -> Result<Vec<Standard>, DatabaseError> {
        let mut rows = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM standards WHERE status = ?1 ORDER BY code LIMIT {limit}"
                        ),
                        [status.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM standards ORDER BY code LIMIT {limit}"),
                        (),
                    )
                    .await?
            }
        };

        let mut standards = Vec::new();
        while let Some(row) = rows.next().await? {
            standards.push(row_to_standard(&row)?);
        }
        Ok(standards)
    }

    pub async fn set_standard_status(
        &self,
        actor_id: &str,
        id: &str,
        status: StandardStatus,
    ) -> Result<Standard, DatabaseError> {
        let current = self.get_standard(id).await?;
        if current.status == status {
            return Ok(current);
        }

        let now = now();
        self.db()
            .conn()
            .execute(
                "UPDATE standards SET status = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![status.as_str(), format_timestamp(now), id],
            )
            .await?;

        let detail = StatusChangedDetail {
            from: current.status.as_str().to_string(),
            to: status.as_str().to_string(),
            reason: None,
        };
        self.record_activity(
            actor_id,
            EntityType::Standard,
            id,
            ActivityAction::StatusChanged,
            Some(to_detail(&detail)?),
        )
        .await?;

        Ok(Standard {
            status,
            updated_at: now,
            ..current
        })
    }
}
