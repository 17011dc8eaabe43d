//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic and the timestamp format.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};

use crate::error::DatabaseError;

/// Current time truncated to the precision stored in the database.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage.
///
/// Fixed-width microsecond RFC 3339 (`2026-02-09T14:30:00.123456Z`), so that
/// `ORDER BY` on the TEXT column is chronological.
#[must_use]
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 and `SQLite`'s default `"2026-02-09 14:30:00"`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a `YYYY-MM-DD` TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Format a calendar date for storage.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all grc-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

/// Serialize a detail payload for the activity log.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_detail<T: serde::Serialize>(detail: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(detail).map_err(|e| DatabaseError::Other(e.into()))
}

/// Map `EntityType` to the corresponding SQL table name.
#[must_use]
pub const fn entity_type_to_table(entity: grc_core::enums::EntityType) -> &'static str {
    use grc_core::enums::EntityType;
    match entity {
        EntityType::Standard => "standards",
        EntityType::Control => "controls",
        EntityType::Implementation => "implementations",
        EntityType::Audit => "audits",
        EntityType::AuditItem => "audit_items",
        EntityType::DataRequest => "data_requests",
        EntityType::DataRequestResponse => "data_request_responses",
        EntityType::FileAttachment => "file_attachments",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_core::enums::Effectiveness;

    #[test]
    fn timestamps_are_fixed_width_and_roundtrip() {
        let a = now();
        let formatted = format_timestamp(a);
        assert_eq!(formatted.len(), "2026-02-09T14:30:00.123456Z".len());
        assert_eq!(parse_datetime(&formatted).unwrap(), a);
    }

    #[test]
    fn timestamp_text_order_is_chronological() {
        let earlier = parse_datetime("2026-02-09T14:30:00.900000Z").unwrap();
        let later = parse_datetime("2026-02-09T14:30:01.000001Z").unwrap();
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }

    #[test]
    fn parses_sqlite_default_datetime() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(format_timestamp(dt), "2026-02-09T14:30:00.000000Z");
    }

    #[test]
    fn parses_snake_case_enum() {
        let eff: Effectiveness = parse_enum("partially_effective").unwrap();
        assert_eq!(eff, Effectiveness::PartiallyEffective);
        assert!(parse_enum::<Effectiveness>("Partially Effective").is_err());
    }

    #[test]
    fn date_roundtrip() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!(format_date(date), "2024-02-29");
        assert!(parse_date("2023-02-29").is_err());
    }
}
