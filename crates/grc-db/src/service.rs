//! Service layer hosting every repository method.
//!
//! `GrcService` wraps `GrcDb` (raw database access). All repo methods are
//! implemented as `impl GrcService` blocks in `crate::repos`, and each
//! mutation appends an activity entry on the same connection, so a
//! surrounding transaction covers both.

use crate::GrcDb;
use crate::error::DatabaseError;

pub struct GrcService {
    db: GrcDb,
}

impl GrcService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = GrcDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `GrcDb`.
    #[must_use]
    pub const fn from_db(db: GrcDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &GrcDb {
        &self.db
    }
}
