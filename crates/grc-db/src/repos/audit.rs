//! Audit repository.
//!
//! Status changes go through [`GrcService::transition_audit`], a
//! compare-and-set on the stored status. Everything else is a plain
//! partial update.

use chrono::NaiveDate;
use grc_core::activity_detail::StatusChangedDetail;
use grc_core::entities::Audit;
use grc_core::enums::{ActivityAction, AuditType, EntityType, WorkflowStatus};
use grc_core::errors::CoreError;
use grc_core::ids::PREFIX_AUDIT;

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, format_timestamp, get_opt_string, now, parse_date, parse_datetime, parse_enum,
    to_detail,
};
use crate::service::GrcService;
use crate::updates::audit::AuditUpdate;

const SELECT_COLS: &str = "id, title, description, manager_id, standard_id, audit_type, status, \
     start_date, end_date, created_at, updated_at";

/// Input for [`GrcService::insert_audit`]. Validation happens upstream.
#[derive(Debug, Clone)]
pub struct NewAudit {
    pub title: String,
    pub description: Option<String>,
    pub manager_id: String,
    pub standard_id: Option<String>,
    pub audit_type: AuditType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

fn row_to_audit(row: &libsql::Row) -> Result<Audit, DatabaseError> {
    Ok(Audit {
        id: row.get(0)?,
        title: row.get(1)?,
        description: get_opt_string(row, 2)?,
        manager_id: row.get(3)?,
        standard_id: get_opt_string(row, 4)?,
        audit_type: parse_enum(&row.get::<String>(5)?)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        start_date: parse_date(&row.get::<String>(7)?)?,
        end_date: parse_date(&row.get::<String>(8)?)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl GrcService {
    /// Insert an audit in `not_started`.
    pub async fn insert_audit(
        &self,
        actor_id: &str,
        input: &NewAudit,
    ) -> Result<Audit, DatabaseError> {
        let now = now();
        let id = self.db().generate_id(PREFIX_AUDIT).await?;
        let status = WorkflowStatus::NotStarted;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO audits ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                libsql::params![
                    id.as_str(),
                    input.title.as_str(),
                    input.description.as_deref(),
                    input.manager_id.as_str(),
                    input.standard_id.as_deref(),
                    input.audit_type.as_str(),
                    status.as_str(),
                    format_date(input.start_date),
                    format_date(input.end_date),
                    format_timestamp(now),
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(actor_id, EntityType::Audit, &id, ActivityAction::Created, None)
            .await?;

        Ok(Audit {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            manager_id: input.manager_id.clone(),
            standard_id: input.standard_id.clone(),
            audit_type: input.audit_type,
            status,
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_audit(&self, id: &str) -> Result<Audit, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM audits WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_audit(&row)
    }

    /// List audits newest first, optionally filtered by status.
    pub async fn list_audits(
        &self,
        status: Option<WorkflowStatus>,
        limit: u32,
    ) -> Result<Vec<Audit>, DatabaseError> {
        let mut rows = match status {
            Some(status) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM audits WHERE status = ?1
                             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                        ),
                        [status.as_str()],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM audits
                             ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                        ),
                        (),
                    )
                    .await?
            }
        };

        let mut audits = Vec::new();
        while let Some(row) = rows.next().await? {
            audits.push(row_to_audit(&row)?);
        }
        Ok(audits)
    }

    pub async fn update_audit(
        &self,
        actor_id: &str,
        id: &str,
        update: AuditUpdate,
    ) -> Result<Audit, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref manager_id) = update.manager_id {
            sets.push(format!("manager_id = ?{idx}"));
            params.push(manager_id.clone().into());
            idx += 1;
        }
        if let Some(start) = update.start_date {
            sets.push(format!("start_date = ?{idx}"));
            params.push(format_date(start).into());
            idx += 1;
        }
        if let Some(end) = update.end_date {
            sets.push(format!("end_date = ?{idx}"));
            params.push(format_date(end).into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_audit(id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_timestamp(now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE audits SET {} WHERE id = ?{idx}", sets.join(", "));
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.record_activity(
            actor_id,
            EntityType::Audit,
            id,
            ActivityAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_audit(id).await
    }

    /// Move an audit from `from` to `to`.
    ///
    /// The UPDATE is guarded on the stored status still being `from`; if
    /// another writer got there first nothing changes and
    /// `DatabaseError::InvalidState` is returned.
    pub async fn transition_audit(
        &self,
        actor_id: &str,
        id: &str,
        from: WorkflowStatus,
        to: WorkflowStatus,
    ) -> Result<Audit, DatabaseError> {
        if !from.can_transition_to(to) {
            return Err(DatabaseError::InvalidState(
                CoreError::invalid_transition(EntityType::Audit.as_str(), id, from, to).to_string(),
            ));
        }

        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE audits SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
                libsql::params![to.as_str(), format_timestamp(now()), id, from.as_str()],
            )
            .await?;
        if changed == 0 {
            let current = self.get_audit(id).await?;
            return Err(DatabaseError::InvalidState(format!(
                "audit {id} is {} (expected {from})",
                current.status
            )));
        }

        let detail = StatusChangedDetail {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
            reason: None,
        };
        self.record_activity(
            actor_id,
            EntityType::Audit,
            id,
            ActivityAction::StatusChanged,
            Some(to_detail(&detail)?),
        )
        .await?;

        self.get_audit(id).await
    }
}
