//! Report storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_storage_dir() -> String {
    "storage".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportsConfig {
    /// Root under which `audit_reports/AuditReport-{id}.pdf` files are kept.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
        }
    }
}

impl ReportsConfig {
    #[must_use]
    pub fn storage_root(&self) -> PathBuf {
        PathBuf::from(&self.storage_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_storage_root() {
        assert_eq!(ReportsConfig::default().storage_root(), PathBuf::from("storage"));
    }
}
