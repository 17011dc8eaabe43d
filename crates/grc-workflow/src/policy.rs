//! Who may take a workflow transition.
//!
//! Role storage is external; the engine only asks a [`PermissionOracle`].
//! The default [`RolePolicy`] consults [`super_admin_bypass`] before any
//! other rule.

use grc_core::entities::Audit;
use grc_core::enums::WorkflowStatus;
use grc_core::identity::Actor;

use crate::engine::RefusalReason;

/// Outcome of a permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(RefusalReason),
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Permission seam consulted before every transition.
///
/// Implementations only judge the actor. Whether the state machine allows
/// the edge at all is checked by the engine.
pub trait PermissionOracle: Send + Sync {
    fn can_start(&self, actor: &Actor, audit: &Audit) -> Decision;
    fn can_complete(&self, actor: &Actor, audit: &Audit) -> Decision;
}

/// Super admins pass every guard.
#[must_use]
pub fn super_admin_bypass(actor: &Actor) -> bool {
    actor.is_super_admin()
}

/// Role-based policy.
///
/// - start: super admin, or the audit manager while the audit is not
///   completed. Re-opening a completed audit is therefore admin-only.
/// - complete: super admin, or anyone while the audit is in progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl PermissionOracle for RolePolicy {
    fn can_start(&self, actor: &Actor, audit: &Audit) -> Decision {
        if super_admin_bypass(actor) {
            return Decision::Allow;
        }
        if audit.status == WorkflowStatus::Completed {
            return Decision::Deny(RefusalReason::ReopenRequiresSuperAdmin);
        }
        if actor.id == audit.manager_id {
            Decision::Allow
        } else {
            Decision::Deny(RefusalReason::NotManager)
        }
    }

    fn can_complete(&self, actor: &Actor, audit: &Audit) -> Decision {
        if super_admin_bypass(actor) || audit.status == WorkflowStatus::InProgress {
            Decision::Allow
        } else {
            Decision::Deny(RefusalReason::NotInProgress)
        }
    }
}
