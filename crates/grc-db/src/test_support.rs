//! Shared fixtures for grc-db unit tests.

use chrono::NaiveDate;
use grc_core::entities::{Audit, AuditItem, Auditable, Control, Implementation, Standard};
use grc_core::enums::{AuditType, StandardStatus};

use crate::repos::audit::NewAudit;
use crate::repos::control::NewControl;
use crate::repos::implementation::NewImplementation;
use crate::repos::standard::NewStandard;
use crate::service::GrcService;

pub const ACTOR: &str = "user-manager";

/// Create an in-memory `GrcService`.
pub async fn test_service() -> GrcService {
    GrcService::new_local(":memory:").await.unwrap()
}

pub async fn seed_standard(svc: &GrcService, code: &str) -> Standard {
    svc.create_standard(
        ACTOR,
        &NewStandard {
            code: code.into(),
            name: format!("{code} standard"),
            authority: None,
            description: None,
            status: StandardStatus::InScope,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_control(svc: &GrcService, standard_id: &str, code: &str) -> Control {
    svc.create_control(
        ACTOR,
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

pub async fn seed_implementation(svc: &GrcService, code: &str) -> Implementation {
    svc.create_implementation(
        ACTOR,
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

pub fn new_audit(audit_type: AuditType, standard_id: Option<&str>) -> NewAudit {
    NewAudit {
        title: "Test audit".into(),
        description: None,
        manager_id: ACTOR.into(),
        standard_id: standard_id.map(String::from),
        audit_type,
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
    }
}

/// Insert an audit with one item per target, outside any transaction.
pub async fn seed_audit(
    svc: &GrcService,
    audit_type: AuditType,
    targets: &[Auditable],
) -> (Audit, Vec<AuditItem>) {
    let audit = svc
        .insert_audit(ACTOR, &new_audit(audit_type, None))
        .await
        .unwrap();
    let mut items = Vec::new();
    for target in targets {
        items.push(
            svc.insert_audit_item(ACTOR, &audit.id, ACTOR, target)
                .await
                .unwrap(),
        );
    }
    (audit, items)
}
