use std::path::Path;

use anyhow::Context;
use grc_config::GrcConfig;
use grc_db::service::GrcService;
use grc_workflow::{ReportStore, WorkflowEngine};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub engine: WorkflowEngine,
    pub config: GrcConfig,
}

impl AppContext {
    /// Open the entity store and wire the workflow engine to the report root.
    pub async fn init(config: GrcConfig) -> anyhow::Result<Self> {
        if !config.database.is_in_memory()
            && let Some(parent) = Path::new(&config.database.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let service = GrcService::new_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        let store = ReportStore::new(config.reports.storage_root());
        tracing::debug!(
            database = %config.database.path,
            reports = %store.root().display(),
            "application context ready"
        );

        Ok(Self {
            engine: WorkflowEngine::new(service, store),
            config,
        })
    }

    pub const fn service(&self) -> &GrcService {
        self.engine.service()
    }

    /// Default list limit from config.
    pub const fn default_limit(&self) -> u32 {
        self.config.general.default_limit
    }
}
