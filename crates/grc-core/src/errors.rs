//! Lifecycle errors shared by the entity store.
//!
//! `grc-db` renders these into `DatabaseError::InvalidState`, which the
//! workflow engine reports as a conflict.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The lifecycle has no edge `from -> to`.
    #[error("{entity_type} {id} cannot move from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },
}

impl CoreError {
    #[must_use]
    pub fn invalid_transition(
        entity_type: impl Into<String>,
        id: impl Into<String>,
        from: impl ToString,
        to: impl ToString,
    ) -> Self {
        Self::InvalidTransition {
            entity_type: entity_type.into(),
            id: id.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
