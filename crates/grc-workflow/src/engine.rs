//! The audit workflow engine.
//!
//! Owns every status change of an audit:
//!
//! ```text
//! not_started ──start──► in_progress ──complete──► completed
//!                             ▲                        │
//!                             └──start (super admin)───┘
//! ```
//!
//! `complete` runs as one transaction: items are completed, their
//! effectiveness is cascaded onto implementations, the report is rendered
//! and written, and the status flips. Any failure rolls all of it back.
//!
//! All operations take the engine's write gate first. Repositories share one
//! libSQL connection, so a transaction opened by one operation would
//! otherwise capture the statements of another.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use grc_core::activity_detail::ReportPersistedDetail;
use grc_core::entities::{Audit, AuditItem, Auditable};
use grc_core::enums::{
    ActivityAction, AuditableKind, Effectiveness, EntityType, StandardStatus, WorkflowStatus,
};
use grc_core::identity::Actor;
use grc_db::error::DatabaseError;
use grc_db::helpers::{now, to_detail};
use grc_db::repos::audit::NewAudit;
use grc_db::repos::auditable::AuditableTarget;
use grc_db::service::GrcService;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{OrNotFound, WorkflowError};
use crate::policy::{Decision, PermissionOracle, RolePolicy};
use crate::render::{PlainTextRenderer, ReportContext, ReportItem, ReportRenderer};
use crate::report_store::ReportStore;
use crate::wizard::{AuditDraft, CreateAuditInput};

/// Why a transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RefusalReason {
    /// Only the audit manager (or a super admin) may start an audit.
    NotManager,
    /// A completed audit can only be re-opened by a super admin.
    ReopenRequiresSuperAdmin,
    /// Only an in-progress audit can be completed by a regular user.
    NotInProgress,
    /// The state machine has no such edge.
    InvalidTransition {
        from: WorkflowStatus,
        to: WorkflowStatus,
    },
}

impl fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotManager => f.write_str("only the audit manager can start this audit"),
            Self::ReopenRequiresSuperAdmin => {
                f.write_str("a completed audit can only be reopened by an administrator")
            }
            Self::NotInProgress => f.write_str("only an audit in progress can be completed"),
            Self::InvalidTransition { from, to } => {
                write!(f, "cannot move an audit from {} to {}", from.label(), to.label())
            }
        }
    }
}

/// Result of `start` or `complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The audit moved; carries the updated row.
    Transitioned(Audit),
    /// Nothing to do (the audit was already in the target state).
    Unchanged(Audit),
    /// The guard said no. Nothing was written.
    Refused(RefusalReason),
}

impl TransitionOutcome {
    #[must_use]
    pub const fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned(_))
    }

    /// Collapse into a `Result`, treating a refusal as an authorization error.
    ///
    /// # Errors
    ///
    /// `WorkflowError::Authorization` for `Refused`.
    pub fn into_result(self) -> Result<Audit, WorkflowError> {
        match self {
            Self::Transitioned(audit) | Self::Unchanged(audit) => Ok(audit),
            Self::Refused(reason) => Err(WorkflowError::Authorization(reason.to_string())),
        }
    }
}

/// Which workflow actions an actor may trigger on an audit right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailableActions {
    pub start: bool,
    pub complete: bool,
    pub download_report: bool,
}

/// Informational banner shown alongside an audit, if its status has one.
#[must_use]
pub const fn status_banner(status: WorkflowStatus) -> Option<&'static str> {
    match status {
        WorkflowStatus::NotStarted => Some(
            "This audit has not yet been started. The audit manager can use the workflow \
             actions to set the state of this audit.",
        ),
        WorkflowStatus::Completed => Some(
            "This audit has been marked as complete. An administrator will need to reopen \
             the audit if necessary.",
        ),
        WorkflowStatus::InProgress => None,
    }
}

pub struct WorkflowEngine {
    service: GrcService,
    store: ReportStore,
    policy: Arc<dyn PermissionOracle>,
    renderer: Arc<dyn ReportRenderer>,
    gate: Mutex<()>,
}

impl WorkflowEngine {
    /// Engine with the role policy and the plain-text renderer.
    #[must_use]
    pub fn new(service: GrcService, store: ReportStore) -> Self {
        Self {
            service,
            store,
            policy: Arc::new(RolePolicy),
            renderer: Arc::new(PlainTextRenderer),
            gate: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl PermissionOracle + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    #[must_use]
    pub fn with_renderer(mut self, renderer: impl ReportRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    #[must_use]
    pub const fn service(&self) -> &GrcService {
        &self.service
    }

    #[must_use]
    pub const fn store(&self) -> &ReportStore {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Validate `input` through every wizard stage and submit it.
    ///
    /// # Errors
    ///
    /// See [`Self::submit`]; wizard stage errors are `Validation`.
    pub async fn create_audit(
        &self,
        actor: &Actor,
        input: CreateAuditInput,
    ) -> Result<Audit, WorkflowError> {
        let draft = input.into_draft()?;
        self.submit(actor, draft).await
    }

    /// Persist a drafted audit with one item per selected target.
    ///
    /// The audit and all of its items are inserted in one transaction; if
    /// any target fails to resolve, nothing is created.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the standard or a selected target does not exist.
    /// - `Validation` if the standard is not in scope, or a control belongs
    ///   to another standard.
    pub async fn submit(&self, actor: &Actor, draft: AuditDraft) -> Result<Audit, WorkflowError> {
        let _gate = self.gate.lock().await;
        self.check_scope(&draft).await?;

        let tx = self.service.db().begin().await?;
        match self.insert_draft(actor, &draft).await {
            Ok(audit) => {
                tx.commit().await.map_err(DatabaseError::from)?;
                info!(
                    audit_id = %audit.id,
                    audit_type = %audit.audit_type,
                    items = draft.targets().len(),
                    actor = %actor.id,
                    "audit created"
                );
                Ok(audit)
            }
            Err(error) => {
                warn!(%error, "audit creation rolled back");
                rollback(tx).await;
                Err(error)
            }
        }
    }

    async fn check_scope(&self, draft: &AuditDraft) -> Result<(), WorkflowError> {
        if let Some(standard_id) = draft.standard_id() {
            let standard = self
                .service
                .get_standard(standard_id)
                .await
                .or_not_found("standard", standard_id)?;
            if standard.status != StandardStatus::InScope {
                return Err(WorkflowError::Validation(format!(
                    "standard {} is {}; only in-scope standards can be audited",
                    standard.code, standard.status
                )));
            }
        }

        for target in draft.targets() {
            let resolved = self
                .service
                .resolve_auditable(target)
                .await
                .or_not_found(target.kind.as_str(), &target.id)?;
            if let (AuditableTarget::Control(control), Some(standard_id)) =
                (&resolved, draft.standard_id())
                && control.standard_id != standard_id
            {
                return Err(WorkflowError::Validation(format!(
                    "control {} does not belong to standard {standard_id}",
                    control.code
                )));
            }
        }
        Ok(())
    }

    async fn insert_draft(&self, actor: &Actor, draft: &AuditDraft) -> Result<Audit, WorkflowError> {
        let info = draft.info();
        let audit = self
            .service
            .insert_audit(
                &actor.id,
                &NewAudit {
                    title: info.title.clone(),
                    description: info.description.clone(),
                    manager_id: info.manager_id.clone(),
                    standard_id: draft.standard_id().map(String::from),
                    audit_type: draft.audit_type(),
                    start_date: info.start_date,
                    end_date: info.end_date,
                },
            )
            .await?;

        for target in draft.targets() {
            self.service
                .insert_audit_item(&actor.id, &audit.id, &info.manager_id, target)
                .await?;
        }
        Ok(audit)
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Move an audit to `in_progress`. From `completed` this re-opens it.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown audit, `Conflict` if the status changed
    /// concurrently. Guard refusals are `Ok(Refused)`.
    pub async fn start(
        &self,
        audit_id: &str,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let _gate = self.gate.lock().await;
        let audit = self.load_audit(audit_id).await?;
        let to = WorkflowStatus::InProgress;

        if !audit.status.can_transition_to(to) {
            return Ok(refuse(&audit, actor, RefusalReason::InvalidTransition {
                from: audit.status,
                to,
            }));
        }
        if let Decision::Deny(reason) = self.policy.can_start(actor, &audit) {
            return Ok(refuse(&audit, actor, reason));
        }

        let tx = self.service.db().begin().await?;
        match self
            .service
            .transition_audit(&actor.id, &audit.id, audit.status, to)
            .await
        {
            Ok(updated) => {
                tx.commit().await.map_err(DatabaseError::from)?;
                info!(
                    audit_id = %audit.id,
                    from = %audit.status,
                    to = %to,
                    actor = %actor.id,
                    reopened = audit.status == WorkflowStatus::Completed,
                    "audit started"
                );
                Ok(TransitionOutcome::Transitioned(updated))
            }
            Err(error) => {
                warn!(audit_id = %audit.id, %error, "audit start rolled back");
                rollback(tx).await;
                Err(conflict(error))
            }
        }
    }

    /// Complete an in-progress audit.
    ///
    /// Completing an already-completed audit is a no-op returning
    /// `Unchanged`; the report is not rewritten.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Conflict`, `Render` or `Io`. On any error the audit,
    /// its items and the implementations are left as they were.
    pub async fn complete(
        &self,
        audit_id: &str,
        actor: &Actor,
    ) -> Result<TransitionOutcome, WorkflowError> {
        let _gate = self.gate.lock().await;
        let audit = self.load_audit(audit_id).await?;
        let to = WorkflowStatus::Completed;

        if audit.status == to {
            debug!(audit_id = %audit.id, "audit already completed");
            return Ok(TransitionOutcome::Unchanged(audit));
        }
        if !audit.status.can_transition_to(to) {
            return Ok(refuse(&audit, actor, RefusalReason::InvalidTransition {
                from: audit.status,
                to,
            }));
        }
        if let Decision::Deny(reason) = self.policy.can_complete(actor, &audit) {
            return Ok(refuse(&audit, actor, reason));
        }

        let tx = self.service.db().begin().await?;
        match self.complete_in_tx(actor, &audit).await {
            Ok(completed) => {
                tx.commit().await.map_err(DatabaseError::from)?;
                info!(audit_id = %audit.id, actor = %actor.id, "audit completed");
                Ok(TransitionOutcome::Transitioned(completed))
            }
            Err(error) => {
                warn!(audit_id = %audit.id, %error, "audit completion rolled back");
                rollback(tx).await;
                Err(error)
            }
        }
    }

    async fn complete_in_tx(&self, actor: &Actor, audit: &Audit) -> Result<Audit, WorkflowError> {
        let completed = self
            .service
            .transition_audit(&actor.id, &audit.id, audit.status, WorkflowStatus::Completed)
            .await
            .map_err(conflict)?;

        let items = self.service.complete_audit_items(&actor.id, &audit.id).await?;
        for item in &items {
            if item.auditable.kind == AuditableKind::Implementation {
                let previous = self
                    .service
                    .set_implementation_effectiveness(
                        &actor.id,
                        &item.auditable.id,
                        item.effectiveness,
                        &audit.id,
                        &item.id,
                    )
                    .await?;
                debug!(
                    implementation_id = %item.auditable.id,
                    from = %previous,
                    to = %item.effectiveness,
                    "effectiveness cascaded"
                );
            }
        }

        let template = completed.audit_type.report_template();
        let ctx = self.report_context(completed.clone(), items).await?;
        let bytes = self.renderer.render(template, &ctx)?;
        let path = self.store.write(&audit.id, &bytes)?;

        let detail = ReportPersistedDetail {
            template: template.as_str().to_string(),
            path: ReportStore::relative_path(&audit.id),
            bytes: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
        };
        self.service
            .record_activity(
                &actor.id,
                EntityType::Audit,
                &audit.id,
                ActivityAction::ReportPersisted,
                Some(to_detail(&detail)?),
            )
            .await?;
        debug!(audit_id = %audit.id, path = %path.display(), "report persisted");

        Ok(completed)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Report bytes for an audit.
    ///
    /// A completed audit serves its persisted report. Any other audit is
    /// rendered on demand and nothing is written.
    ///
    /// # Errors
    ///
    /// `ReportUnavailable` if a completed audit's file is missing or
    /// unreadable; `Render` if on-demand rendering fails.
    pub async fn get_report(&self, audit_id: &str) -> Result<Vec<u8>, WorkflowError> {
        let _gate = self.gate.lock().await;
        let audit = self.load_audit(audit_id).await?;

        if audit.status == WorkflowStatus::Completed {
            return match self.store.read(&audit.id) {
                Ok(bytes) => {
                    debug!(audit_id = %audit.id, "serving persisted report");
                    Ok(bytes)
                }
                Err(error) => {
                    warn!(audit_id = %audit.id, %error, "persisted report unavailable");
                    Err(WorkflowError::ReportUnavailable { audit_id: audit.id })
                }
            };
        }

        let items = self.service.list_audit_items(&audit.id).await?;
        let template = audit.audit_type.report_template();
        let ctx = self.report_context(audit, items).await?;
        Ok(self.renderer.render(template, &ctx)?)
    }

    /// Effectiveness of a control: that of the most recently updated
    /// completed audit item evaluating it, or `Unknown`.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown control.
    pub async fn control_effectiveness(
        &self,
        control_id: &str,
    ) -> Result<Effectiveness, WorkflowError> {
        Ok(self
            .latest_control_reading(control_id)
            .await?
            .map_or(Effectiveness::Unknown, |item| item.effectiveness))
    }

    /// When the reading returned by [`Self::control_effectiveness`] was
    /// taken. `None` if the control was never assessed.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown control.
    pub async fn control_effectiveness_as_of(
        &self,
        control_id: &str,
    ) -> Result<Option<DateTime<Utc>>, WorkflowError> {
        Ok(self
            .latest_control_reading(control_id)
            .await?
            .map(|item| item.updated_at))
    }

    async fn latest_control_reading(
        &self,
        control_id: &str,
    ) -> Result<Option<AuditItem>, WorkflowError> {
        let _gate = self.gate.lock().await;
        self.service
            .get_control(control_id)
            .await
            .or_not_found("control", control_id)?;
        Ok(self
            .service
            .latest_completed_item_for(&Auditable::control(control_id))
            .await?)
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown audit.
    pub async fn available_actions(
        &self,
        audit_id: &str,
        actor: &Actor,
    ) -> Result<AvailableActions, WorkflowError> {
        let _gate = self.gate.lock().await;
        let audit = self.load_audit(audit_id).await?;
        Ok(AvailableActions {
            start: audit.status.can_transition_to(WorkflowStatus::InProgress)
                && self.policy.can_start(actor, &audit).is_allowed(),
            complete: audit.status.can_transition_to(WorkflowStatus::Completed)
                && self.policy.can_complete(actor, &audit).is_allowed(),
            download_report: audit.status != WorkflowStatus::NotStarted,
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn load_audit(&self, audit_id: &str) -> Result<Audit, WorkflowError> {
        self.service.get_audit(audit_id).await.or_not_found("audit", audit_id)
    }

    async fn report_context(
        &self,
        audit: Audit,
        items: Vec<AuditItem>,
    ) -> Result<ReportContext, WorkflowError> {
        let standard = match audit.standard_id.as_deref() {
            Some(id) => Some(self.service.get_standard(id).await.or_not_found("standard", id)?),
            None => None,
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            let target = self
                .service
                .resolve_auditable(&item.auditable)
                .await
                .or_not_found(item.auditable.kind.as_str(), &item.auditable.id)?;
            entries.push(ReportItem {
                code: target.code().to_string(),
                title: target.title().to_string(),
                item,
            });
        }

        Ok(ReportContext {
            audit,
            standard,
            items: entries,
            generated_at: now(),
        })
    }
}

fn refuse(audit: &Audit, actor: &Actor, reason: RefusalReason) -> TransitionOutcome {
    warn!(
        audit_id = %audit.id,
        status = %audit.status,
        actor = %actor.id,
        %reason,
        "transition refused"
    );
    TransitionOutcome::Refused(reason)
}

/// A lost compare-and-set on the audit status is a conflict.
fn conflict(error: DatabaseError) -> WorkflowError {
    match error {
        DatabaseError::InvalidState(message) => WorkflowError::Conflict(message),
        other => WorkflowError::Database(other),
    }
}

async fn rollback(tx: libsql::Transaction) {
    if let Err(error) = tx.rollback().await {
        warn!(%error, "rollback failed");
    }
}
