//! Shared fixtures for workflow integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use grc_core::entities::{Audit, AuditItem, Control, Implementation, Standard};
use grc_core::enums::{AuditType, Effectiveness, ReportTemplate, StandardStatus};
use grc_core::identity::Actor;
use grc_db::repos::control::NewControl;
use grc_db::repos::implementation::NewImplementation;
use grc_db::repos::standard::NewStandard;
use grc_db::service::GrcService;
use grc_db::updates::audit_item::AuditItemUpdateBuilder;
use grc_workflow::{
    CreateAuditInput, PlainTextRenderer, RenderError, ReportContext, ReportRenderer, ReportStore,
    WorkflowEngine,
};
use tempfile::TempDir;

pub const MANAGER: &str = "user-manager";

pub fn manager() -> Actor {
    Actor::user(MANAGER)
}

pub fn stranger() -> Actor {
    Actor::user("user-stranger")
}

pub fn admin() -> Actor {
    Actor::super_admin("user-admin")
}

/// An engine over an in-memory database with reports in a temp dir.
pub struct Harness {
    pub engine: WorkflowEngine,
    pub storage: TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with(|engine| engine).await
    }

    pub async fn with(configure: impl FnOnce(WorkflowEngine) -> WorkflowEngine) -> Self {
        let storage = TempDir::new().unwrap();
        let service = GrcService::new_local(":memory:").await.unwrap();
        let engine = configure(WorkflowEngine::new(service, ReportStore::new(storage.path())));
        Self { engine, storage }
    }

    /// Like [`Self::new`], but reports go under `root` instead of the temp dir.
    pub async fn with_store_root(root: impl Into<PathBuf>) -> Self {
        let storage = TempDir::new().unwrap();
        let service = GrcService::new_local(":memory:").await.unwrap();
        let engine = WorkflowEngine::new(service, ReportStore::new(root));
        Self { engine, storage }
    }

    pub fn svc(&self) -> &GrcService {
        self.engine.service()
    }

    pub async fn standard(&self, code: &str, status: StandardStatus) -> Standard {
        self.svc()
            .create_standard(
                MANAGER,
                &NewStandard {
                    code: code.into(),
                    name: format!("{code} standard"),
                    authority: None,
                    description: None,
                    status,
                },
            )
            .await
            .unwrap()
    }

    pub async fn control(&self, standard_id: &str, code: &str) -> Control {
        self.svc()
            .create_control(
                MANAGER,
                &NewControl {
                    standard_id: standard_id.into(),
                    code: code.into(),
                    title: format!("Control {code}"),
                    description: None,
                },
            )
            .await
            .unwrap()
    }

    pub async fn implementation(&self, code: &str) -> Implementation {
        self.svc()
            .create_implementation(
                MANAGER,
                &NewImplementation {
                    code: code.into(),
                    title: format!("Implementation {code}"),
                    details: "details".into(),
                    notes: None,
                },
            )
            .await
            .unwrap()
    }

    /// Create an audit over `ids` through the engine.
    pub async fn audit(
        &self,
        audit_type: AuditType,
        standard_id: Option<&str>,
        ids: &[&str],
    ) -> Audit {
        self.engine
            .create_audit(&manager(), input(audit_type, standard_id, ids))
            .await
            .unwrap()
    }

    pub async fn items(&self, audit_id: &str) -> Vec<AuditItem> {
        self.svc().list_audit_items(audit_id).await.unwrap()
    }

    pub async fn assess(&self, item_id: &str, effectiveness: Effectiveness) {
        self.svc()
            .update_audit_item(
                MANAGER,
                item_id,
                AuditItemUpdateBuilder::new().effectiveness(effectiveness).build(),
            )
            .await
            .unwrap();
    }

    pub async fn start(&self, audit_id: &str) {
        assert!(self.engine.start(audit_id, &manager()).await.unwrap().is_transitioned());
    }

    pub async fn complete(&self, audit_id: &str) {
        assert!(self.engine.complete(audit_id, &manager()).await.unwrap().is_transitioned());
    }
}

pub fn input(audit_type: AuditType, standard_id: Option<&str>, ids: &[&str]) -> CreateAuditInput {
    CreateAuditInput {
        audit_type,
        standard_id: standard_id.map(String::from),
        manager_id: MANAGER.into(),
        title: "FY26 audit".into(),
        description: None,
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        selected_target_ids: ids.iter().map(ToString::to_string).collect(),
    }
}

/// Delegates to the plain-text renderer and counts calls.
#[derive(Clone, Default)]
pub struct CountingRenderer {
    pub calls: Arc<AtomicUsize>,
}

impl CountingRenderer {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReportRenderer for CountingRenderer {
    fn render(&self, template: ReportTemplate, ctx: &ReportContext) -> Result<Vec<u8>, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        PlainTextRenderer.render(template, ctx)
    }
}

/// Always fails.
pub struct FailingRenderer;

impl ReportRenderer for FailingRenderer {
    fn render(&self, template: ReportTemplate, _ctx: &ReportContext) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::new(template, "template engine unavailable"))
    }
}
