//! Acting-user identity.
//!
//! Authentication and role storage are external. Callers resolve the user
//! and hand the workflow an [`Actor`] carrying the roles it needs to know.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Roles the workflow policy understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Bypasses every workflow guard.
    SuperAdmin,
    Auditor,
    User,
}

/// The user performing an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Actor {
    pub id: String,
    pub roles: Vec<Role>,
}

impl Actor {
    #[must_use]
    pub fn new(id: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            id: id.into(),
            roles,
        }
    }

    /// An actor holding only the plain user role.
    #[must_use]
    pub fn user(id: impl Into<String>) -> Self {
        Self::new(id, vec![Role::User])
    }

    #[must_use]
    pub fn super_admin(id: impl Into<String>) -> Self {
        Self::new(id, vec![Role::SuperAdmin])
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.has_role(Role::SuperAdmin)
    }
}
