//! Audit creation through the staged wizard.

mod common;

use chrono::NaiveDate;
use grc_core::entities::Auditable;
use grc_core::enums::{
    ActivityAction, Applicability, AuditType, Effectiveness, EntityType, StandardStatus,
    WorkflowStatus,
};
use grc_db::repos::activity::ActivityFilter;
use grc_workflow::{AuditWizard, BasicInfo, WorkflowError};
use pretty_assertions::assert_eq;

use common::{Harness, MANAGER, input, manager};

async fn audit_count(h: &Harness) -> usize {
    h.svc().list_audits(None, 1000).await.unwrap().len()
}

#[tokio::test]
async fn selected_controls_become_items() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let c1 = h.control(&s1.id, "C1").await;
    h.control(&s1.id, "C2").await;
    let c3 = h.control(&s1.id, "C3").await;

    let audit = h
        .engine
        .create_audit(
            &manager(),
            input(AuditType::Standards, Some(&s1.id), &[&c1.id, &c3.id]),
        )
        .await
        .unwrap();

    assert_eq!(audit.status, WorkflowStatus::NotStarted);
    assert_eq!(audit.standard_id.as_deref(), Some(s1.id.as_str()));

    let items = h.items(&audit.id).await;
    let targets: Vec<_> = items.iter().map(|i| i.auditable.clone()).collect();
    assert_eq!(targets, vec![Auditable::control(&c1.id), Auditable::control(&c3.id)]);
    for item in &items {
        assert_eq!(item.status, WorkflowStatus::NotStarted);
        assert_eq!(item.effectiveness, Effectiveness::NotAssessed);
        assert_eq!(item.effectiveness.label(), "Not Assessed");
        assert_eq!(item.applicability, Applicability::Applicable);
        assert_eq!(item.user_id, MANAGER);
    }
}

#[tokio::test]
async fn staged_wizard_offers_preselected_scope() {
    let h = Harness::new().await;
    let a = h.implementation("IMP-A").await;
    let b = h.implementation("IMP-B").await;

    let entered = AuditWizard::choose_type(AuditType::Implementations, None)
        .unwrap()
        .basic_info(BasicInfo {
            title: "Implementation review".into(),
            description: Some("Quarterly".into()),
            manager_id: MANAGER.into(),
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
        })
        .unwrap();

    let options = entered.scope_options(h.svc()).await.unwrap();
    assert_eq!(options.len(), 2);
    assert!(options.iter().all(|o| o.selected));
    assert_eq!(options[0].code, "IMP-A");

    let selected: Vec<String> = options.iter().map(|o| o.auditable.id.clone()).collect();
    let draft = entered.select_targets(selected).unwrap();
    let audit = h.engine.submit(&manager(), draft).await.unwrap();

    let items = h.items(&audit.id).await;
    assert_eq!(
        items.iter().map(|i| i.auditable.id.clone()).collect::<Vec<_>>(),
        vec![a.id, b.id]
    );
    assert_eq!(audit.description.as_deref(), Some("Quarterly"));
}

#[tokio::test]
async fn scope_options_list_only_the_standards_controls() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let s2 = h.standard("S2", StandardStatus::InScope).await;
    h.control(&s1.id, "C1").await;
    h.control(&s2.id, "X1").await;

    let entered = AuditWizard::choose_type(AuditType::Standards, Some(s1.id.clone()))
        .unwrap()
        .basic_info(BasicInfo {
            title: "S1 review".into(),
            description: None,
            manager_id: MANAGER.into(),
            start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
        })
        .unwrap();

    let codes: Vec<_> = entered
        .scope_options(h.svc())
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.code)
        .collect();
    assert_eq!(codes, vec!["C1".to_string()]);
}

#[tokio::test]
async fn unknown_target_creates_nothing() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let c1 = h.control(&s1.id, "C1").await;

    let err = h
        .engine
        .create_audit(
            &manager(),
            input(AuditType::Standards, Some(&s1.id), &[&c1.id, "ctl-deadbeef"]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::NotFound { entity: "control", ref id } if id == "ctl-deadbeef"));
    assert_eq!(audit_count(&h).await, 0);
}

#[tokio::test]
async fn control_from_another_standard_is_rejected() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let s2 = h.standard("S2", StandardStatus::InScope).await;
    let c1 = h.control(&s1.id, "C1").await;
    let foreign = h.control(&s2.id, "X1").await;

    let err = h
        .engine
        .create_audit(
            &manager(),
            input(AuditType::Standards, Some(&s1.id), &[&c1.id, &foreign.id]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(audit_count(&h).await, 0);
}

#[tokio::test]
async fn control_id_in_implementations_audit_is_not_found() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let c1 = h.control(&s1.id, "C1").await;

    let err = h
        .engine
        .create_audit(&manager(), input(AuditType::Implementations, None, &[&c1.id]))
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::NotFound { entity: "implementation", .. }));
    assert_eq!(audit_count(&h).await, 0);
}

#[tokio::test]
async fn standard_must_exist_and_be_in_scope() {
    let h = Harness::new().await;
    let draft = h.standard("DRAFT", StandardStatus::Draft).await;
    let c1 = h.control(&draft.id, "C1").await;

    let err = h
        .engine
        .create_audit(&manager(), input(AuditType::Standards, Some(&draft.id), &[&c1.id]))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(ref m) if m.contains("in-scope")));

    let err = h
        .engine
        .create_audit(&manager(), input(AuditType::Standards, Some("std-missing"), &[&c1.id]))
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { entity: "standard", .. }));

    assert_eq!(audit_count(&h).await, 0);
}

#[tokio::test]
async fn invalid_basic_info_never_reaches_the_store() {
    let h = Harness::new().await;
    let imp = h.implementation("IMP-A").await;

    let mut bad = input(AuditType::Implementations, None, &[&imp.id]);
    bad.title = "   ".into();
    let err = h.engine.create_audit(&manager(), bad).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let mut bad = input(AuditType::Implementations, None, &[&imp.id]);
    bad.end_date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    let err = h.engine.create_audit(&manager(), bad).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    assert_eq!(audit_count(&h).await, 0);
}

#[tokio::test]
async fn creation_is_logged() {
    let h = Harness::new().await;
    let imp = h.implementation("IMP-A").await;
    let audit = h.audit(AuditType::Implementations, None, &[&imp.id]).await;

    let created = h
        .svc()
        .query_activity(&ActivityFilter {
            entity_type: Some(EntityType::AuditItem),
            action: Some(ActivityAction::Created),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.len(), 1);

    let audit_entries = h
        .svc()
        .query_activity(&ActivityFilter {
            entity_id: Some(audit.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(audit_entries.len(), 1);
    assert_eq!(audit_entries[0].actor_id.as_deref(), Some(MANAGER));
}
