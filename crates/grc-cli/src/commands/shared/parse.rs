use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional raw value.
pub fn parse_opt_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

#[cfg(test)]
mod tests {
    use grc_core::enums::{AuditType, Effectiveness, WorkflowStatus};

    use super::{parse_enum, parse_opt_enum};

    #[test]
    fn parses_snake_case_enum() {
        let status: WorkflowStatus =
            parse_enum("in_progress", "status").expect("status should parse");
        assert_eq!(status, WorkflowStatus::InProgress);
    }

    #[test]
    fn parses_hyphenated_alias() {
        let eff: Effectiveness =
            parse_enum("partially-effective", "effectiveness").expect("should parse");
        assert_eq!(eff, Effectiveness::PartiallyEffective);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<AuditType>("controls", "audit type").expect_err("should fail");
        assert!(err.to_string().contains("invalid audit type 'controls'"));
    }

    #[test]
    fn missing_value_is_none() {
        let parsed = parse_opt_enum::<WorkflowStatus>(None, "status").expect("none parses");
        assert!(parsed.is_none());
    }
}
