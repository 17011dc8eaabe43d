//! # grc-config
//!
//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GRC_*` prefix, `__` as separator)
//! 2. Project-level `.grc/config.toml`
//! 3. User-level `~/.config/grc/config.toml`
//! 4. Built-in defaults
//!
//! `GRC_DATABASE__PATH` maps to `database.path`,
//! `GRC_REPORTS__STORAGE_DIR` to `reports.storage_dir`.
//!
//! # Usage
//!
//! ```no_run
//! use grc_config::GrcConfig;
//!
//! let config = GrcConfig::load_with_dotenv().expect("config");
//! println!("reports under {}", config.reports.storage_dir);
//! ```

mod database;
mod error;
mod general;
mod reports;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use reports::ReportsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GrcConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl GrcConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".grc/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("GRC_").split("__"))
    }

    /// Reject values that would make the store or report cache unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.reports.storage_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "reports.storage_dir".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("grc").join("config.toml"))
    }
}
