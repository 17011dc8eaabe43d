//! Implementation update builder.
//!
//! Effectiveness is excluded; it changes only when a completed audit
//! cascades into it (`GrcService::set_implementation_effectiveness`).

use grc_core::enums::ImplementationStatus;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImplementationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ImplementationStatus>,
}

pub struct ImplementationUpdateBuilder(ImplementationUpdate);

impl ImplementationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ImplementationUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.0.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.0.notes = Some(notes);
        self
    }

    #[must_use]
    pub const fn status(mut self, status: ImplementationStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn build(self) -> ImplementationUpdate {
        self.0
    }
}

impl Default for ImplementationUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
