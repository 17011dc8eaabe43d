//! Control repository, including the control ↔ implementation links.

use grc_core::activity_detail::LinkedDetail;
use grc_core::entities::{Control, Implementation};
use grc_core::enums::{ActivityAction, Applicability, EntityType};
use grc_core::ids::PREFIX_CONTROL;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now, parse_datetime, parse_enum, to_detail};
use crate::repos::implementation::{SELECT_COLS as IMPL_COLS, row_to_implementation};
use crate::service::GrcService;

const SELECT_COLS: &str =
    "id, standard_id, code, title, description, status, created_at, updated_at";

/// Input for [`GrcService::create_control`].
#[derive(Debug, Clone)]
pub struct NewControl {
    pub standard_id: String,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
}

fn row_to_control(row: &libsql::Row) -> Result<Control, DatabaseError> {
    Ok(Control {
        id: row.get(0)?,
        standard_id: row.get(1)?,
        code: row.get(2)?,
        title: row.get(3)?,
        description: get_opt_string(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl GrcService {
    pub async fn create_control(
        &self,
        actor_id: &str,
        input: &NewControl,
    ) -> Result<Control, DatabaseError> {
        let now = now();
        let id = self.db().generate_id(PREFIX_CONTROL).await?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO controls ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
                libsql::params![
                    id.as_str(),
                    input.standard_id.as_str(),
                    input.code.as_str(),
                    input.title.as_str(),
                    input.description.as_deref(),
                    Applicability::Unknown.as_str(),
                    format_timestamp(now),
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(actor_id, EntityType::Control, &id, ActivityAction::Created, None)
            .await?;

        Ok(Control {
            id,
            standard_id: input.standard_id.clone(),
            code: input.code.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            status: Applicability::Unknown,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_control(&self, id: &str) -> Result<Control, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM controls WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_control(&row)
    }

    /// All controls of a standard, ordered by code.
    pub async fn list_controls_for_standard(
        &self,
        standard_id: &str,
    ) -> Result<Vec<Control>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM controls WHERE standard_id = ?1 ORDER BY code"),
                [standard_id],
            )
            .await?;

        let mut controls = Vec::new();
        while let Some(row) = rows.next().await? {
            controls.push(row_to_control(&row)?);
        }
        Ok(controls)
    }

    /// Link a control and an implementation. Linking twice is a no-op.
    pub async fn link_control_implementation(
        &self,
        actor_id: &str,
        control_id: &str,
        implementation_id: &str,
    ) -> Result<(), DatabaseError> {
        let inserted = self
            .db()
            .conn()
            .execute(
                "INSERT OR IGNORE INTO control_implementations (control_id, implementation_id, created_at)
                 VALUES (?1, ?2, ?3)",
                libsql::params![control_id, implementation_id, format_timestamp(now())],
            )
            .await?;

        if inserted > 0 {
            let detail = LinkedDetail {
                source_type: EntityType::Control.as_str().to_string(),
                source_id: control_id.to_string(),
                target_type: EntityType::Implementation.as_str().to_string(),
                target_id: implementation_id.to_string(),
            };
            self.record_activity(
                actor_id,
                EntityType::Control,
                control_id,
                ActivityAction::Linked,
                Some(to_detail(&detail)?),
            )
            .await?;
        }
        Ok(())
    }

    pub async fn implementations_for_control(
        &self,
        control_id: &str,
    ) -> Result<Vec<Implementation>, DatabaseError> {
        let cols = IMPL_COLS
            .split(", ")
            .map(|c| format!("i.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {cols} FROM implementations i
                     JOIN control_implementations ci ON ci.implementation_id = i.id
                     WHERE ci.control_id = ?1 ORDER BY i.code"
                ),
                [control_id],
            )
            .await?;

        let mut implementations = Vec::new();
        while let Some(row) = rows.next().await? {
            implementations.push(row_to_implementation(&row)?);
        }
        Ok(implementations)
    }

    pub async fn controls_for_implementation(
        &self,
        implementation_id: &str,
    ) -> Result<Vec<Control>, DatabaseError> {
        let cols = SELECT_COLS
            .split(", ")
            .map(|c| format!("c.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {cols} FROM controls c
                     JOIN control_implementations ci ON ci.control_id = c.id
                     WHERE ci.implementation_id = ?1 ORDER BY c.code"
                ),
                [implementation_id],
            )
            .await?;

        let mut controls = Vec::new();
        while let Some(row) = rows.next().await? {
            controls.push(row_to_control(&row)?);
        }
        Ok(controls)
    }
}
