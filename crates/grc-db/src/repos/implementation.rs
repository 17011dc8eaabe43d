//! Implementation repository.

use grc_core::activity_detail::EffectivenessCascadedDetail;
use grc_core::entities::Implementation;
use grc_core::enums::{ActivityAction, Effectiveness, EntityType, ImplementationStatus};
use grc_core::ids::PREFIX_IMPLEMENTATION;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now, parse_datetime, parse_enum, to_detail};
use crate::service::GrcService;
use crate::updates::implementation::ImplementationUpdate;

pub(crate) const SELECT_COLS: &str =
    "id, code, title, details, notes, status, effectiveness, created_at, updated_at";

/// Input for [`GrcService::create_implementation`].
#[derive(Debug, Clone)]
pub struct NewImplementation {
    pub code: String,
    pub title: String,
    pub details: String,
    pub notes: Option<String>,
}

pub(crate) fn row_to_implementation(row: &libsql::Row) -> Result<Implementation, DatabaseError> {
    Ok(Implementation {
        id: row.get(0)?,
        code: row.get(1)?,
        title: row.get(2)?,
        details: row.get(3)?,
        notes: get_opt_string(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        effectiveness: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl GrcService {
    /// Create an implementation. Status and effectiveness start `unknown`.
    pub async fn create_implementation(
        &self,
        actor_id: &str,
        input: &NewImplementation,
    ) -> Result<Implementation, DatabaseError> {
        let now = now();
        let id = self.db().generate_id(PREFIX_IMPLEMENTATION).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO implementations ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    input.code.as_str(),
                    input.title.as_str(),
                    input.details.as_str(),
                    input.notes.as_deref(),
                    ImplementationStatus::Unknown.as_str(),
                    Effectiveness::Unknown.as_str(),
                    format_timestamp(now),
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(
            actor_id,
            EntityType::Implementation,
            &id,
            ActivityAction::Created,
            None,
        )
        .await?;

        Ok(Implementation {
            id,
            code: input.code.clone(),
            title: input.title.clone(),
            details: input.details.clone(),
            notes: input.notes.clone(),
            status: ImplementationStatus::Unknown,
            effectiveness: Effectiveness::Unknown,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_implementation(&self, id: &str) -> Result<Implementation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM implementations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_implementation(&row)
    }

    pub async fn list_implementations(
        &self,
        limit: u32,
    ) -> Result<Vec<Implementation>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM implementations ORDER BY code LIMIT {limit}"),
                (),
            )
            .await?;

        let mut implementations = Vec::new();
        while let Some(row) = rows.next().await? {
            implementations.push(row_to_implementation(&row)?);
        }
        Ok(implementations)
    }

    pub async fn update_implementation(
        &self,
        actor_id: &str,
        id: &str,
        update: ImplementationUpdate,
    ) -> Result<Implementation, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref details) = update.details {
            sets.push(format!("details = ?{idx}"));
            params.push(details.clone().into());
            idx += 1;
        }
        if let Some(ref notes) = update.notes {
            sets.push(format!("notes = ?{idx}"));
            params.push(notes.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_implementation(id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_timestamp(now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!(
            "UPDATE implementations SET {} WHERE id = ?{idx}",
            sets.join(", ")
        );
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
            EntityType::Implementation,
            id,
            ActivityAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_implementation(id).await
    }

    /// Overwrite an implementation's effectiveness with the verdict of a
    /// completed audit item. Returns the previous value.
    pub async fn set_implementation_effectiveness(
        &self,
        actor_id: &str,
        id: &str,
        effectiveness: Effectiveness,
        audit_id: &str,
        audit_item_id: &str,
    ) -> Result<Effectiveness, DatabaseError> {
        let previous = self.get_implementation(id).await?.effectiveness;

        self.db()
            .conn()
            .execute(
                "UPDATE implementations SET effectiveness = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![effectiveness.as_str(), format_timestamp(now()), id],
            )
            .await?;

        let detail = EffectivenessCascadedDetail {
            audit_id: audit_id.to_string(),
            audit_item_id: audit_item_id.to_string(),
            from: previous,
            to: effectiveness,
        };
        self.record_activity(
            actor_id,
            EntityType::Implementation,
            id,
            ActivityAction::EffectivenessCascaded,
            Some(to_detail(&detail)?),
        )
        .await?;

        Ok(previous)
    }
}
