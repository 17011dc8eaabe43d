//! Derived control effectiveness.

mod common;

use grc_core::enums::{AuditType, Effectiveness, StandardStatus};
use grc_workflow::WorkflowError;
use pretty_assertions::assert_eq;

use common::{Harness, admin};

#[tokio::test]
async fn unassessed_control_is_unknown() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let c1 = h.control(&s1.id, "C1").await;

    assert_eq!(h.engine.control_effectiveness(&c1.id).await.unwrap(), Effectiveness::Unknown);
    assert_eq!(h.engine.control_effectiveness_as_of(&c1.id).await.unwrap(), None);

    // An audit in progress does not count yet.
    let audit = h.audit(AuditType::Standards, Some(&s1.id), &[&c1.id]).await;
    h.start(&audit.id).await;
    h.assess(&h.items(&audit.id).await[0].id, Effectiveness::Effective).await;
    assert_eq!(h.engine.control_effectiveness(&c1.id).await.unwrap(), Effectiveness::Unknown);
}

#[tokio::test]
async fn latest_completion_wins_over_newest_audit() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let c1 = h.control(&s1.id, "C1").await;

    // Created first, completed last.
    let older = h.audit(AuditType::Standards, Some(&s1.id), &[&c1.id]).await;
    let newer = h.audit(AuditType::Standards, Some(&s1.id), &[&c1.id]).await;
    h.start(&older.id).await;
    h.start(&newer.id).await;
    h.assess(&h.items(&older.id).await[0].id, Effectiveness::PartiallyEffective).await;
    h.assess(&h.items(&newer.id).await[0].id, Effectiveness::Ineffective).await;

    h.complete(&newer.id).await;
    assert_eq!(
        h.engine.control_effectiveness(&c1.id).await.unwrap(),
        Effectiveness::Ineffective
    );

    h.complete(&older.id).await;
    assert_eq!(
        h.engine.control_effectiveness(&c1.id).await.unwrap(),
        Effectiveness::PartiallyEffective
    );

    let as_of = h.engine.control_effectiveness_as_of(&c1.id).await.unwrap().unwrap();
    assert_eq!(as_of, h.items(&older.id).await[0].updated_at);
}

#[tokio::test]
async fn reopened_audit_stops_counting_until_recompleted() {
    let h = Harness::new().await;
    let s1 = h.standard("S1", StandardStatus::InScope).await;
    let c1 = h.control(&s1.id, "C1").await;

    let first = h.audit(AuditType::Standards, Some(&s1.id), &[&c1.id]).await;
    h.start(&first.id).await;
    h.assess(&h.items(&first.id).await[0].id, Effectiveness::PartiallyEffective).await;
    h.complete(&first.id).await;

    let second = h.audit(AuditType::Standards, Some(&s1.id), &[&c1.id]).await;
    h.start(&second.id).await;
    h.assess(&h.items(&second.id).await[0].id, Effectiveness::Effective).await;
    h.complete(&second.id).await;
    assert_eq!(h.engine.control_effectiveness(&c1.id).await.unwrap(), Effectiveness::Effective);

    // Reopened and re-assessed: falls back to the first audit.
    assert!(h.engine.start(&second.id, &admin()).await.unwrap().is_transitioned());
    h.assess(&h.items(&second.id).await[0].id, Effectiveness::Ineffective).await;
    assert_eq!(
        h.engine.control_effectiveness(&c1.id).await.unwrap(),
        Effectiveness::PartiallyEffective
    );
    assert_eq!(
        h.engine.control_effectiveness_as_of(&c1.id).await.unwrap(),
        Some(h.items(&first.id).await[0].updated_at)
    );

    h.complete(&second.id).await;
    assert_eq!(h.engine.control_effectiveness(&c1.id).await.unwrap(), Effectiveness::Ineffective);
}

#[tokio::test]
async fn unknown_control_is_not_found() {
    let h = Harness::new().await;
    let err = h.engine.control_effectiveness("ctl-00000000").await.unwrap_err();
    assert!(matches!(err, WorkflowError::NotFound { entity: "control", .. }));
}
