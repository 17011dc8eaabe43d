//! Staged audit creation.
//!
//! ```text
//! AuditWizard::choose_type ─► ScopeChosen ─basic_info─► InfoEntered ─select_targets─► AuditDraft
//!                                                          │
//!                                                    scope_options
//! ```
//!
//! Each stage validates what it can without the database and hands a typed
//! value to the next. Existence and scope of the selected targets are
//! checked when the draft is submitted to
//! [`WorkflowEngine::submit`](crate::engine::WorkflowEngine::submit).

use chrono::NaiveDate;
use grc_core::entities::Auditable;
use grc_core::enums::AuditType;
use grc_db::repos::auditable::AuditableTarget;
use grc_db::service::GrcService;
use serde::Serialize;

use crate::error::{OrNotFound, WorkflowError};

/// Maximum audit title length, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Entry point of the wizard.
pub struct AuditWizard;

impl AuditWizard {
    /// Stage 1: pick the audit type and, for standards audits, the standard.
    ///
    /// # Errors
    ///
    /// `Validation` if a standards audit has no standard, or an
    /// implementations audit names one.
    pub fn choose_type(
        audit_type: AuditType,
        standard_id: Option<String>,
    ) -> Result<ScopeChosen, WorkflowError> {
        let standard_id = standard_id.filter(|s| !s.trim().is_empty());
        match (audit_type, &standard_id) {
            (AuditType::Standards, None) => Err(WorkflowError::Validation(
                "a standards audit requires a standard".into(),
            )),
            (AuditType::Implementations, Some(_)) => Err(WorkflowError::Validation(
                "an implementations audit is not scoped to a standard".into(),
            )),
            _ => Ok(ScopeChosen {
                audit_type,
                standard_id,
            }),
        }
    }
}

/// Output of stage 1.
#[derive(Debug, Clone)]
pub struct ScopeChosen {
    audit_type: AuditType,
    standard_id: Option<String>,
}

/// Stage 2 input.
#[derive(Debug, Clone, Serialize)]
pub struct BasicInfo {
    pub title: String,
    pub description: Option<String>,
    pub manager_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ScopeChosen {
    #[must_use]
    pub const fn audit_type(&self) -> AuditType {
        self.audit_type
    }

    #[must_use]
    pub fn standard_id(&self) -> Option<&str> {
        self.standard_id.as_deref()
    }

    /// Stage 2: title, manager and period.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank or over-long title, a blank manager, or an
    /// end date before the start date.
    pub fn basic_info(self, mut info: BasicInfo) -> Result<InfoEntered, WorkflowError> {
        info.title = info.title.trim().to_string();
        if info.title.is_empty() {
            return Err(WorkflowError::Validation("title is required".into()));
        }
        if info.title.chars().count() > MAX_TITLE_LEN {
            return Err(WorkflowError::Validation(format!(
                "title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        if info.manager_id.trim().is_empty() {
            return Err(WorkflowError::Validation("audit manager is required".into()));
        }
        if info.end_date < info.start_date {
            return Err(WorkflowError::Validation(format!(
                "end date {} is before start date {}",
                info.end_date, info.start_date
            )));
        }
        info.description = info.description.filter(|d| !d.trim().is_empty());
        Ok(InfoEntered { scope: self, info })
    }
}

/// One selectable target offered at stage 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeOption {
    pub auditable: Auditable,
    pub code: String,
    pub title: String,
    /// Every option starts selected.
    pub selected: bool,
}

impl From<AuditableTarget> for ScopeOption {
    fn from(target: AuditableTarget) -> Self {
        Self {
            auditable: target.auditable(),
            code: target.code().to_string(),
            title: target.title().to_string(),
            selected: true,
        }
    }
}

/// Output of stage 2.
#[derive(Debug, Clone)]
pub struct InfoEntered {
    scope: ScopeChosen,
    info: BasicInfo,
}

impl InfoEntered {
    #[must_use]
    pub const fn info(&self) -> &BasicInfo {
        &self.info
    }

    /// The targets the audit may cover: the standard's controls, or every
    /// implementation.
    ///
    /// # Errors
    ///
    /// `NotFound` if the chosen standard does not exist.
    pub async fn scope_options(
        &self,
        service: &GrcService,
    ) -> Result<Vec<ScopeOption>, WorkflowError> {
        let options = match self.scope.standard_id.as_deref() {
            Some(standard_id) => {
                service.get_standard(standard_id).await.or_not_found("standard", standard_id)?;
                service
                    .list_controls_for_standard(standard_id)
                    .await?
                    .into_iter()
                    .map(|c| ScopeOption::from(AuditableTarget::Control(c)))
                    .collect()
            }
            None => service
                .list_implementations(u32::MAX)
                .await?
                .into_iter()
                .map(|i| ScopeOption::from(AuditableTarget::Implementation(i)))
                .collect(),
        };
        Ok(options)
    }

    /// Stage 3: the targets to audit. Duplicates collapse to their first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// `Validation` if no target (or a blank id) is given.
    pub fn select_targets<I, S>(self, ids: I) -> Result<AuditDraft, WorkflowError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut targets: Vec<String> = Vec::new();
        for id in ids {
            let id: String = id.into();
            let id = id.trim();
            if id.is_empty() {
                return Err(WorkflowError::Validation("blank target id".into()));
            }
            if !targets.iter().any(|t| t == id) {
                targets.push(id.to_string());
            }
        }
        if targets.is_empty() {
            return Err(WorkflowError::Validation(
                "at least one target must be selected".into(),
            ));
        }

        let kind = self.scope.audit_type.auditable_kind();
        Ok(AuditDraft {
            audit_type: self.scope.audit_type,
            standard_id: self.scope.standard_id,
            info: self.info,
            targets: targets
                .into_iter()
                .map(|id| Auditable { kind, id })
                .collect(),
        })
    }
}

/// A fully staged audit, ready for submission.
#[derive(Debug, Clone)]
pub struct AuditDraft {
    audit_type: AuditType,
    standard_id: Option<String>,
    info: BasicInfo,
    targets: Vec<Auditable>,
}

impl AuditDraft {
    #[must_use]
    pub const fn audit_type(&self) -> AuditType {
        self.audit_type
    }

    #[must_use]
    pub fn standard_id(&self) -> Option<&str> {
        self.standard_id.as_deref()
    }

    #[must_use]
    pub const fn info(&self) -> &BasicInfo {
        &self.info
    }

    /// Selected targets in selection order, all of the audit's kind.
    #[must_use]
    pub fn targets(&self) -> &[Auditable] {
        &self.targets
    }
}

/// Single-shot form of the wizard.
#[derive(Debug, Clone)]
pub struct CreateAuditInput {
    pub audit_type: AuditType,
    pub standard_id: Option<String>,
    pub manager_id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub selected_target_ids: Vec<String>,
}

impl CreateAuditInput {
    /// Run every wizard stage.
    ///
    /// # Errors
    ///
    /// The first stage's `Validation` error.
    pub fn into_draft(self) -> Result<AuditDraft, WorkflowError> {
        AuditWizard::choose_type(self.audit_type, self.standard_id)?
            .basic_info(BasicInfo {
                title: self.title,
                description: self.description,
                manager_id: self.manager_id,
                start_date: self.start_date,
                end_date: self.end_date,
            })?
            .select_targets(self.selected_target_ids)
    }
}
