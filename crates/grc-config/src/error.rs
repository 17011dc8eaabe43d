//! Errors raised while assembling [`crate::GrcConfig`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `GRC_*` variable could not be parsed into the config shape.
    #[error("failed to load grc config: {0}")]
    Figment(#[from] figment::Error),

    /// Parsed fine, but the value cannot be used (empty path, zero limit).
    #[error("config key '{field}' {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::ConfigError;

    #[test]
    fn invalid_value_names_the_key() {
        let err = ConfigError::InvalidValue {
            field: "reports.storage_dir".into(),
            reason: "must not be empty".into(),
        };
        assert_eq!(err.to_string(), "config key 'reports.storage_dir' must not be empty");
    }
}
