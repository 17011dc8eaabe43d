//! Audit update builder.
//!
//! Status is deliberately absent: it only moves through
//! `GrcService::transition_audit`.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl AuditUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.manager_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }
}

pub struct AuditUpdateBuilder(AuditUpdate);

impl AuditUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(AuditUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn manager_id(mut self, manager_id: impl Into<String>) -> Self {
        self.0.manager_id = Some(manager_id.into());
        self
    }

    #[must_use]
    pub const fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.0.start_date = Some(start);
        self.0.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn build(self) -> AuditUpdate {
        self.0
    }
}

impl Default for AuditUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
