//! Errors surfaced by the entity store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A stored value could not be decoded, or a statement was malformed.
    #[error("store query error: {0}")]
    Query(String),

    #[error("schema setup failed: {0}")]
    Migration(String),

    /// The row looked up by id does not exist.
    #[error("no matching row")]
    NoResult,

    /// The row exists but is in the wrong state: a disallowed transition, or a
    /// status that changed under us.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("libsql: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
