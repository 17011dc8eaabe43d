//! Status enums, entity types, and actions for the audit workflow.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// WorkflowStatus
// ---------------------------------------------------------------------------

/// Status of an audit or one of its audit items.
///
/// ```text
/// not_started → in_progress → completed
///                    ↑             │
///                    └─ reopened ──┘
/// ```
///
/// There is no direct edge between `not_started` and `completed`. Who may
/// take an edge is decided by the permission policy, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl WorkflowStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::NotStarted | Self::Completed => &[Self::InProgress],
            Self::InProgress => &[Self::Completed],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditType / AuditableKind / ReportTemplate
// ---------------------------------------------------------------------------

/// What an audit is scoped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditType {
    /// Controls of one standard.
    Standards,
    /// Implementations across the organization.
    Implementations,
}

impl AuditType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standards => "standards",
            Self::Implementations => "implementations",
        }
    }

    /// The auditable kind every item of this audit must reference.
    #[must_use]
    pub const fn auditable_kind(self) -> AuditableKind {
        match self {
            Self::Standards => AuditableKind::Control,
            Self::Implementations => AuditableKind::Implementation,
        }
    }

    /// Report template rendered for this audit type.
    #[must_use]
    pub const fn report_template(self) -> ReportTemplate {
        match self {
            Self::Standards => ReportTemplate::Standard,
            Self::Implementations => ReportTemplate::Implementation,
        }
    }
}

impl fmt::Display for AuditType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag of the polymorphic `auditable` association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditableKind {
    Control,
    Implementation,
}

impl AuditableKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Implementation => "implementation",
        }
    }
}

impl fmt::Display for AuditableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report layout handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportTemplate {
    Standard,
    Implementation,
}

impl ReportTemplate {
    /// Template name understood by the rendering engine.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "reports.audit",
            Self::Implementation => "reports.implementation-report",
        }
    }
}

impl fmt::Display for ReportTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Applicability
// ---------------------------------------------------------------------------

/// Whether a control or implementation applies to the audit's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    Applicable,
    NotApplicable,
    PartiallyApplicable,
    Unknown,
}

impl Applicability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applicable => "applicable",
            Self::NotApplicable => "not_applicable",
            Self::PartiallyApplicable => "partially_applicable",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Applicable => "Applicable",
            Self::NotApplicable => "Not Applicable",
            Self::PartiallyApplicable => "Partially Applicable",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Applicability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Effectiveness
// ---------------------------------------------------------------------------

/// Assessed operating effectiveness of a control or implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    Effective,
    PartiallyEffective,
    Ineffective,
    /// Placeholder for a freshly created audit item.
    NotAssessed,
    /// No completed assessment exists.
    Unknown,
}

impl Effectiveness {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Effective => "effective",
            Self::PartiallyEffective => "partially_effective",
            Self::Ineffective => "ineffective",
            Self::NotAssessed => "not_assessed",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Effective => "Effective",
            Self::PartiallyEffective => "Partially Effective",
            Self::Ineffective => "Ineffective",
            Self::NotAssessed => "Not Assessed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Effectiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StandardStatus
// ---------------------------------------------------------------------------

/// Scope status of a standard. Only `in_scope` standards can be audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StandardStatus {
    Draft,
    InScope,
    OutOfScope,
}

impl StandardStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InScope => "in_scope",
            Self::OutOfScope => "out_of_scope",
        }
    }
}

impl fmt::Display for StandardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ImplementationStatus
// ---------------------------------------------------------------------------

/// How completely an implementation is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImplementationStatus {
    Implemented,
    PartiallyImplemented,
    NotImplemented,
    Unknown,
}

impl ImplementationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Implemented => "implemented",
            Self::PartiallyImplemented => "partially_implemented",
            Self::NotImplemented => "not_implemented",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImplementationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DataRequestStatus
// ---------------------------------------------------------------------------

/// Status of an evidence request.
///
/// ```text
/// pending → responded → accepted
///               ↑     → rejected
///               └──────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataRequestStatus {
    Pending,
    Responded,
    Accepted,
    Rejected,
}

impl DataRequestStatus {
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Responded],
            Self::Responded => &[Self::Accepted, Self::Rejected],
            Self::Rejected => &[Self::Responded],
            Self::Accepted => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Responded => "responded",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for DataRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Entity types recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Standard,
    Control,
    Implementation,
    Audit,
    AuditItem,
    DataRequest,
    DataRequestResponse,
    FileAttachment,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Control => "control",
            Self::Implementation => "implementation",
            Self::Audit => "audit",
            Self::AuditItem => "audit_item",
            Self::DataRequest => "data_request",
            Self::DataRequestResponse => "data_request_response",
            Self::FileAttachment => "file_attachment",
        }
    }
}

impl From<AuditableKind> for EntityType {
    fn from(kind: AuditableKind) -> Self {
        match kind {
            AuditableKind::Control => Self::Control,
            AuditableKind::Implementation => Self::Implementation,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActivityAction
// ---------------------------------------------------------------------------

/// Mutation recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Updated,
    StatusChanged,
    EffectivenessCascaded,
    ReportPersisted,
    Linked,
}

impl ActivityAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::EffectivenessCascaded => "effectiveness_cascaded",
            Self::ReportPersisted => "report_persisted",
            Self::Linked => "linked",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn workflow_forward_edges() {
        assert!(WorkflowStatus::NotStarted.can_transition_to(WorkflowStatus::InProgress));
        assert!(WorkflowStatus::InProgress.can_transition_to(WorkflowStatus::Completed));
        assert!(WorkflowStatus::Completed.can_transition_to(WorkflowStatus::InProgress));
    }

    #[test]
    fn workflow_has_no_shortcut_between_not_started_and_completed() {
        assert!(!WorkflowStatus::NotStarted.can_transition_to(WorkflowStatus::Completed));
        assert!(!WorkflowStatus::Completed.can_transition_to(WorkflowStatus::NotStarted));
        assert!(!WorkflowStatus::InProgress.can_transition_to(WorkflowStatus::NotStarted));
    }

    #[test]
    fn workflow_has_no_self_loops() {
        for status in [
            WorkflowStatus::NotStarted,
            WorkflowStatus::InProgress,
            WorkflowStatus::Completed,
        ] {
            assert!(!status.can_transition_to(status), "{status} loops");
        }
    }

    #[test]
    fn audit_type_drives_kind_and_template() {
        assert_eq!(AuditType::Standards.auditable_kind(), AuditableKind::Control);
        assert_eq!(
            AuditType::Implementations.auditable_kind(),
            AuditableKind::Implementation
        );
        assert_eq!(AuditType::Standards.report_template().as_str(), "reports.audit");
        assert_eq!(
            AuditType::Implementations.report_template().as_str(),
            "reports.implementation-report"
        );
    }

    #[test]
    fn as_str_matches_serde() {
        let json = serde_json::to_string(&Effectiveness::PartiallyEffective).unwrap();
        assert_eq!(json, format!("\"{}\"", Effectiveness::PartiallyEffective.as_str()));
        let json = serde_json::to_string(&WorkflowStatus::NotStarted).unwrap();
        assert_eq!(json, format!("\"{}\"", WorkflowStatus::NotStarted.as_str()));
    }

    #[test]
    fn accepted_data_request_is_terminal() {
        assert!(DataRequestStatus::Accepted.allowed_next_states().is_empty());
        assert!(DataRequestStatus::Rejected.can_transition_to(DataRequestStatus::Responded));
    }
}
