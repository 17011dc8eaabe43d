//! Settings that apply across commands.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows returned by `list` commands when neither `--limit` flag is given.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_limit_defaults_to_twenty() {
        assert_eq!(GeneralConfig::default().default_limit, 20);
    }
}
