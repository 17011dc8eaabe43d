//! Audit item repository.
//!
//! Items are created together with their audit and never re-targeted. The
//! `auditable_type`/`auditable_id` column pair stores the polymorphic
//! [`Auditable`] reference.

use grc_core::activity_detail::StatusChangedDetail;
use grc_core::entities::{AuditItem, Auditable};
use grc_core::enums::{
    ActivityAction, Applicability, Effectiveness, EntityType, WorkflowStatus,
};
use grc_core::ids::PREFIX_AUDIT_ITEM;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, get_opt_string, now, parse_datetime, parse_enum, to_detail};
use crate::service::GrcService;
use crate::updates::audit_item::AuditItemUpdate;

const SELECT_COLS: &str = "id, audit_id, user_id, status, applicability, effectiveness, \
     auditor_notes, auditable_type, auditable_id, created_at, updated_at";

fn row_to_audit_item(row: &libsql::Row) -> Result<AuditItem, DatabaseError> {
    Ok(AuditItem {
        id: row.get(0)?,
        audit_id: row.get(1)?,
        user_id: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        applicability: parse_enum(&row.get::<String>(4)?)?,
        effectiveness: parse_enum(&row.get::<String>(5)?)?,
        auditor_notes: get_opt_string(row, 6)?,
        auditable: Auditable {
            kind: parse_enum(&row.get::<String>(7)?)?,
            id: row.get(8)?,
        },
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl GrcService {
    /// Insert an item evaluating `target`, owned by `user_id`.
    ///
    /// Starts `not_started`, `applicable`, `not_assessed`. The schema rejects
    /// a target whose kind does not match the audit's type.
    pub async fn insert_audit_item(
        &self,
        actor_id: &str,
        audit_id: &str,
        user_id: &str,
        target: &Auditable,
    ) -> Result<AuditItem, DatabaseError> {
        let now = now();
        let id = self.db().generate_id(PREFIX_AUDIT_ITEM).await?;
        let status = WorkflowStatus::NotStarted;
        let applicability = Applicability::Applicable;
        let effectiveness = Effectiveness::NotAssessed;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO audit_items ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                libsql::params![
                    id.as_str(),
                    audit_id,
                    user_id,
                    status.as_str(),
                    applicability.as_str(),
                    effectiveness.as_str(),
                    libsql::Value::Null,
                    target.kind.as_str(),
                    target.id.as_str(),
                    format_timestamp(now),
                    format_timestamp(now)
                ],
            )
            .await?;

        self.record_activity(actor_id, EntityType::AuditItem, &id, ActivityAction::Created, None)
            .await?;

        Ok(AuditItem {
            id,
            audit_id: audit_id.to_string(),
            user_id: user_id.to_string(),
            status,
            applicability,
            effectiveness,
            auditor_notes: None,
            auditable: target.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_audit_item(&self, id: &str) -> Result<AuditItem, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM audit_items WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_audit_item(&row)
    }

    /// Items of an audit in creation order.
    pub async fn list_audit_items(&self, audit_id: &str) -> Result<Vec<AuditItem>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM audit_items WHERE audit_id = ?1
                     ORDER BY created_at, rowid"
                ),
                [audit_id],
            )
            .await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_audit_item(&row)?);
        }
        Ok(items)
    }

    pub async fn update_audit_item(
        &self,
        actor_id: &str,
        id: &str,
        update: AuditItemUpdate,
    ) -> Result<AuditItem, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref user_id) = update.user_id {
            sets.push(format!("user_id = ?{idx}"));
            params.push(user_id.clone().into());
            idx += 1;
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(applicability) = update.applicability {
            sets.push(format!("applicability = ?{idx}"));
            params.push(applicability.as_str().into());
            idx += 1;
        }
        if let Some(effectiveness) = update.effectiveness {
            sets.push(format!("effectiveness = ?{idx}"));
            params.push(effectiveness.as_str().into());
            idx += 1;
        }
        if let Some(ref notes) = update.auditor_notes {
            sets.push(format!("auditor_notes = ?{idx}"));
            params.push(notes.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }

        if sets.is_empty() {
            return self.get_audit_item(id).await;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(format_timestamp(now()).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE audit_items SET {} WHERE id = ?{idx}", sets.join(", "));
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
            EntityType::AuditItem,
            id,
            ActivityAction::Updated,
            Some(to_detail(&update)?),
        )
        .await?;

        self.get_audit_item(id).await
    }

    /// Mark every not-yet-completed item of an audit `completed`, stamping
    /// them all with one shared timestamp. Returns the full item list
    /// afterwards.
    pub async fn complete_audit_items(
        &self,
        actor_id: &str,
        audit_id: &str,
    ) -> Result<Vec<AuditItem>, DatabaseError> {
        let pending: Vec<AuditItem> = self
            .list_audit_items(audit_id)
            .await?
            .into_iter()
            .filter(|item| item.status != WorkflowStatus::Completed)
            .collect();

        let stamp = format_timestamp(now());
        for item in &pending {
            self.db()
                .conn()
                .execute(
                    "UPDATE audit_items SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    libsql::params![WorkflowStatus::Completed.as_str(), stamp.as_str(), item.id.as_str()],
                )
                .await?;

            let detail = StatusChangedDetail {
                from: item.status.as_str().to_string(),
                to: WorkflowStatus::Completed.as_str().to_string(),
                reason: Some(format!("audit {audit_id} completed")),
            };
            self.record_activity(
                actor_id,
                EntityType::AuditItem,
                &item.id,
                ActivityAction::StatusChanged,
                Some(to_detail(&detail)?),
            )
            .await?;
        }

        self.list_audit_items(audit_id).await
    }

    /// The most recently updated completed item evaluating `target`, across
    /// all completed audits. Items of a reopened audit are skipped until it
    /// completes again. Ties on `updated_at` go to the later-inserted row.
    pub async fn latest_completed_item_for(
        &self,
        target: &Auditable,
    ) -> Result<Option<AuditItem>, DatabaseError> {
        let cols = SELECT_COLS
            .split(", ")
            .map(|c| format!("i.{}", c.trim()))
            .collect::<Vec<_>>()
            .join(", ");
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {cols} FROM audit_items i
                     JOIN audits a ON a.id = i.audit_id
                     WHERE i.auditable_type = ?1 AND i.auditable_id = ?2
                       AND i.status = ?3 AND a.status = ?3
                     ORDER BY i.updated_at DESC, i.rowid DESC LIMIT 1"
                ),
                libsql::params![
                    target.kind.as_str(),
                    target.id.as_str(),
                    WorkflowStatus::Completed.as_str()
                ],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row_to_audit_item(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use grc_core::enums::AuditType;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{
        ACTOR, seed_audit, seed_control, seed_implementation, seed_standard, test_service,
    };
    use crate::updates::audit_item::AuditItemUpdateBuilder;

    /// Complete the items and walk the audit through to `completed`.
    async fn finish(svc: &GrcService, audit_id: &str) {
        svc.complete_audit_items(ACTOR, audit_id).await.unwrap();
        svc.transition_audit(ACTOR, audit_id, WorkflowStatus::NotStarted, WorkflowStatus::InProgress)
            .await
            .unwrap();
        svc.transition_audit(ACTOR, audit_id, WorkflowStatus::InProgress, WorkflowStatus::Completed)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn items_start_with_defaults() {
        let svc = test_service().await;
        let imp = seed_implementation(&svc, "IMP-1").await;
        let (_, items) = seed_audit(
            &svc,
            AuditType::Implementations,
            &[Auditable::implementation(&imp.id)],
        )
        .await;

        let item = svc.get_audit_item(&items[0].id).await.unwrap();
        assert_eq!(item.status, WorkflowStatus::NotStarted);
        assert_eq!(item.applicability, Applicability::Applicable);
        assert_eq!(item.effectiveness, Effectiveness::NotAssessed);
        assert_eq!(item.user_id, ACTOR);
        assert_eq!(item.auditable, Auditable::implementation(&imp.id));
    }

    #[tokio::test]
    async fn list_preserves_creation_order() {
        let svc = test_service().await;
        let a = seed_implementation(&svc, "IMP-A").await;
        let b = seed_implementation(&svc, "IMP-B").await;
        let c = seed_implementation(&svc, "IMP-C").await;
        let (audit, created) = seed_audit(
            &svc,
            AuditType::Implementations,
            &[
                Auditable::implementation(&c.id),
                Auditable::implementation(&a.id),
                Auditable::implementation(&b.id),
            ],
        )
        .await;

        let listed = svc.list_audit_items(&audit.id).await.unwrap();
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn duplicate_target_is_rejected() {
        let svc = test_service().await;
        let imp = seed_implementation(&svc, "IMP-1").await;
        let (audit, _) = seed_audit(
            &svc,
            AuditType::Implementations,
            &[Auditable::implementation(&imp.id)],
        )
        .await;

        let dup = svc
            .insert_audit_item(ACTOR, &audit.id, ACTOR, &Auditable::implementation(&imp.id))
            .await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn assessment_update() {
        let svc = test_service().await;
        let imp = seed_implementation(&svc, "IMP-1").await;
        let (_, items) = seed_audit(
            &svc,
            AuditType::Implementations,
            &[Auditable::implementation(&imp.id)],
        )
        .await;

        let update = AuditItemUpdateBuilder::new()
            .effectiveness(Effectiveness::Ineffective)
            .auditor_notes(Some("no evidence of review".into()))
            .build();
        let item = svc.update_audit_item(ACTOR, &items[0].id, update).await.unwrap();
        assert_eq!(item.effectiveness, Effectiveness::Ineffective);
        assert_eq!(item.auditor_notes.as_deref(), Some("no evidence of review"));
        assert_eq!(item.status, WorkflowStatus::NotStarted);
    }

    #[tokio::test]
    async fn complete_marks_all_items() {
        let svc = test_service().await;
        let a = seed_implementation(&svc, "IMP-A").await;
        let b = seed_implementation(&svc, "IMP-B").await;
        let (audit, _) = seed_audit(
            &svc,
            AuditType::Implementations,
            &[Auditable::implementation(&a.id), Auditable::implementation(&b.id)],
        )
        .await;

        let items = svc.complete_audit_items(ACTOR, &audit.id).await.unwrap();
        assert!(items.iter().all(|i| i.status == WorkflowStatus::Completed));
        assert_eq!(items[0].updated_at, items[1].updated_at);
    }

    #[tokio::test]
    async fn latest_completed_ignores_unfinished_items() {
        let svc = test_service().await;
        let standard = seed_standard(&svc, "SOC2").await;
        let control = seed_control(&svc, &standard.id, "CC6.1").await;
        let target = Auditable::control(&control.id);

        assert!(svc.latest_completed_item_for(&target).await.unwrap().is_none());

        let (first, first_items) =
            seed_audit(&svc, AuditType::Standards, std::slice::from_ref(&target)).await;
        svc.update_audit_item(
            ACTOR,
            &first_items[0].id,
            AuditItemUpdateBuilder::new()
                .effectiveness(Effectiveness::Effective)
                .build(),
        )
        .await
        .unwrap();
        finish(&svc, &first.id).await;

        // A later audit still in progress does not count.
        let (_, second_items) =
            seed_audit(&svc, AuditType::Standards, std::slice::from_ref(&target)).await;
        svc.update_audit_item(
            ACTOR,
            &second_items[0].id,
            AuditItemUpdateBuilder::new()
                .effectiveness(Effectiveness::Ineffective)
                .build(),
        )
        .await
        .unwrap();

        let latest = svc.latest_completed_item_for(&target).await.unwrap().unwrap();
        assert_eq!(latest.id, first_items[0].id);
        assert_eq!(latest.effectiveness, Effectiveness::Effective);
    }

    #[tokio::test]
    async fn latest_completed_picks_most_recent() {
        let svc = test_service().await;
        let standard = seed_standard(&svc, "SOC2").await;
        let control = seed_control(&svc, &standard.id, "CC6.1").await;
        let target = Auditable::control(&control.id);

        let (first, _) = seed_audit(&svc, AuditType::Standards, std::slice::from_ref(&target)).await;
        finish(&svc, &first.id).await;
        let (second, second_items) =
            seed_audit(&svc, AuditType::Standards, std::slice::from_ref(&target)).await;
        finish(&svc, &second.id).await;

        let latest = svc.latest_completed_item_for(&target).await.unwrap().unwrap();
        assert_eq!(latest.id, second_items[0].id);
    }

    #[tokio::test]
    async fn latest_completed_skips_reopened_audits() {
        let svc = test_service().await;
        let standard = seed_standard(&svc, "SOC2").await;
        let control = seed_control(&svc, &standard.id, "CC6.1").await;
        let target = Auditable::control(&control.id);

        let (first, first_items) =
            seed_audit(&svc, AuditType::Standards, std::slice::from_ref(&target)).await;
        finish(&svc, &first.id).await;
        let (second, second_items) =
            seed_audit(&svc, AuditType::Standards, std::slice::from_ref(&target)).await;
        finish(&svc, &second.id).await;

        svc.transition_audit(ACTOR, &second.id, WorkflowStatus::Completed, WorkflowStatus::InProgress)
            .await
            .unwrap();
        svc.update_audit_item(
            ACTOR,
            &second_items[0].id,
            AuditItemUpdateBuilder::new()
                .effectiveness(Effectiveness::Ineffective)
                .build(),
        )
        .await
        .unwrap();

        let latest = svc.latest_completed_item_for(&target).await.unwrap().unwrap();
        assert_eq!(latest.id, first_items[0].id);
    }
}
