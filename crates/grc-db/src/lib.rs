//! # grc-db
//!
//! libSQL entity store for the audit workflow.
//!
//! Handles all relational state: standards, controls, implementations and
//! their many-to-many links, audits with their polymorphic audit items,
//! data requests with responses and attachments, and the activity log.
//!
//! Uses the `libsql` crate (C `SQLite` fork) in local mode. One connection is
//! shared by every repository; transactions opened on it cover every repo
//! call made until commit or rollback.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
pub(crate) mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection.
pub struct GrcDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl GrcDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let grc_db = Self { db, conn };
        grc_db.run_migrations().await?;
        Ok(grc_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Begin a transaction on the shared connection.
    ///
    /// Statements issued through [`Self::conn`] until the returned handle is
    /// committed or rolled back belong to it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a transaction is already open.
    pub async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.conn.transaction().await?)
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"aud-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> GrcDb {
        GrcDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "standards",
            "controls",
            "implementations",
            "control_implementations",
            "audits",
            "audit_items",
            "data_requests",
            "data_request_responses",
            "file_attachments",
            "activity_log",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("aud").await.unwrap();
        assert!(id.starts_with("aud-"), "ID should start with 'aud-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in grc_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn rollback_discards_statements_on_shared_connection() {
        let db = test_db().await;
        let tx = db.begin().await.unwrap();
        db.conn()
            .execute(
                "INSERT INTO standards (id, code, name, created_at, updated_at) \
                 VALUES ('std-t1', 'T1', 'Temp', '2026-01-01', '2026-01-01')",
                (),
            )
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM standards", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn item_kind_must_match_audit_type() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO audits (id, title, manager_id, audit_type, start_date, end_date, created_at, updated_at) \
                 VALUES ('aud-t1', 'T', 'u1', 'implementations', '2026-01-01', '2026-01-31', 'x', 'x')",
                (),
            )
            .await
            .unwrap();

        let result = db
            .conn()
            .execute(
                "INSERT INTO audit_items (id, audit_id, user_id, auditable_type, auditable_id, created_at, updated_at) \
                 VALUES ('itm-t1', 'aud-t1', 'u1', 'control', 'ctl-1', 'x', 'x')",
                (),
            )
            .await;
        assert!(result.is_err(), "control item in implementations audit must be rejected");
    }

    #[tokio::test]
    async fn end_date_before_start_is_rejected() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO audits (id, title, manager_id, audit_type, start_date, end_date, created_at, updated_at) \
                 VALUES ('aud-t2', 'T', 'u1', 'standards', '2026-02-01', '2026-01-01', 'x', 'x')",
                (),
            )
            .await;
        assert!(result.is_err());
    }
}
