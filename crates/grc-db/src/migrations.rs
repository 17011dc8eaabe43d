//! Schema setup.
//!
//! The schema ships inside the binary and is applied every time a database
//! is opened; every statement is `IF NOT EXISTS`, so reopening is a no-op.

use crate::GrcDb;
use crate::error::DatabaseError;

/// Standards, controls, implementations and their link table, audits, audit
/// items, data requests with responses and attachments, and the activity log.
const SCHEMA_V1: &str = include_str!("../migrations/001_initial.sql");

impl GrcDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_V1)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        tracing::debug!("schema v1 applied");
        Ok(())
    }
}
