use grc_db::error::DatabaseError;

/// Turn a missing row into a readable "not found" error.
pub fn require<T>(result: Result<T, DatabaseError>, entity: &str, id: &str) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(DatabaseError::NoResult) => Err(anyhow::anyhow!("{entity} '{id}' not found")),
        Err(error) => Err(error.into()),
    }
}
