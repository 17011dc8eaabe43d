use grc_core::entities::{Audit, AuditItem};
use grc_workflow::{AvailableActions, RefusalReason, TransitionOutcome};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AuditView {
    pub audit: Audit,
    pub banner: Option<&'static str>,
    pub actions: AvailableActions,
    pub item_count: usize,
}

/// An audit item with the code and title of what it evaluates.
#[derive(Debug, Serialize)]
pub struct ItemRow {
    #[serde(flatten)]
    pub item: AuditItem,
    pub code: String,
    pub title: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionResponse {
    Transitioned {
        audit: Audit,
        banner: Option<&'static str>,
        report_path: Option<String>,
    },
    Unchanged {
        audit: Audit,
    },
    Refused {
        #[serde(flatten)]
        reason: RefusalReason,
    },
}

impl TransitionResponse {
    pub fn from_outcome(outcome: TransitionOutcome, report_path: Option<String>) -> Self {
        match outcome {
            TransitionOutcome::Transitioned(audit) => Self::Transitioned {
                banner: grc_workflow::status_banner(audit.status),
                audit,
                report_path,
            },
            TransitionOutcome::Unchanged(audit) => Self::Unchanged { audit },
            TransitionOutcome::Refused(reason) => Self::Refused { reason },
        }
    }

    pub const fn refusal(&self) -> Option<&RefusalReason> {
        match self {
            Self::Refused { reason } => Some(reason),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportWritten {
    pub audit_id: String,
    pub path: String,
    pub bytes: usize,
}
