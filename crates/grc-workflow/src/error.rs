//! Workflow error types.

use grc_db::error::DatabaseError;

use crate::render::RenderError;

/// Errors from the wizard and the workflow engine.
///
/// A refused transition is not an error; see
/// [`TransitionOutcome`](crate::engine::TransitionOutcome). It only becomes
/// [`WorkflowError::Authorization`] through `into_result()`.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Input failed validation. Nothing was written.
    #[error("validation error: {0}")]
    Validation(String),

    /// The actor may not perform the requested transition.
    #[error("not authorized: {0}")]
    Authorization(String),

    /// The report renderer failed. The transition was rolled back.
    #[error("report rendering failed: {0}")]
    Render(#[from] RenderError),

    /// A completed audit's persisted report is missing or unreadable.
    #[error("report for audit {audit_id} is not available")]
    ReportUnavailable { audit_id: String },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The stored state changed underneath the operation.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Writing the report file failed. The transition was rolled back.
    #[error("report storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Maps `DatabaseError::NoResult` from a lookup to `WorkflowError::NotFound`.
pub(crate) trait OrNotFound<T> {
    fn or_not_found(self, entity: &'static str, id: &str) -> Result<T, WorkflowError>;
}

impl<T> OrNotFound<T> for Result<T, DatabaseError> {
    fn or_not_found(self, entity: &'static str, id: &str) -> Result<T, WorkflowError> {
        self.map_err(|e| match e {
            DatabaseError::NoResult => WorkflowError::NotFound {
                entity,
                id: id.to_string(),
            },
            other => WorkflowError::Database(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_result_becomes_not_found() {
        let result: Result<(), DatabaseError> = Err(DatabaseError::NoResult);
        let err = result.or_not_found("audit", "aud-1").unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { entity: "audit", ref id } if id == "aud-1"));
        assert_eq!(err.to_string(), "audit not found: aud-1");
    }

    #[test]
    fn other_database_errors_pass_through() {
        let result: Result<(), DatabaseError> = Err(DatabaseError::Query("boom".into()));
        let err = result.or_not_found("audit", "aud-1").unwrap_err();
        assert!(matches!(err, WorkflowError::Database(DatabaseError::Query(_))));
    }
}
