//! Audit item update builder.
//!
//! Covers the assessment fields an auditor fills in. The auditable target
//! is not updatable.

use grc_core::enums::{Applicability, Effectiveness, WorkflowStatus};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkflowStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicability: Option<Applicability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<Effectiveness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auditor_notes: Option<Option<String>>,
}

impl AuditItemUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.status.is_none()
            && self.applicability.is_none()
            && self.effectiveness.is_none()
            && self.auditor_notes.is_none()
    }
}

pub struct AuditItemUpdateBuilder(AuditItemUpdate);

impl AuditItemUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AuditItemUpdate::default())
    }

    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.0.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub const fn status(mut self, status: WorkflowStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub const fn applicability(mut self, applicability: Applicability) -> Self {
        self.0.applicability = Some(applicability);
        self
    }

    #[must_use]
    pub const fn effectiveness(mut self, effectiveness: Effectiveness) -> Self {
        self.0.effectiveness = Some(effectiveness);
        self
    }

    #[must_use]
    pub fn auditor_notes(mut self, notes: Option<String>) -> Self {
        self.0.auditor_notes = Some(notes);
        self
    }

    #[must_use]
    pub fn build(self) -> AuditItemUpdate {
        self.0
    }
}

impl Default for AuditItemUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
