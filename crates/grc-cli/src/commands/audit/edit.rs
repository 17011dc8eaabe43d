use anyhow::bail;
use chrono::NaiveDate;
use grc_core::entities::Audit;
use grc_core::enums::WorkflowStatus;
use grc_db::updates::audit::{AuditUpdate, AuditUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::require;
use crate::context::AppContext;
use crate::output::output;

pub struct EditParams<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub manager: Option<&'a str>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

pub async fn run(
    id: &str,
    params: &EditParams<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service();
    let audit = require(service.get_audit(id).await, "audit", id)?;
    let update = build_update(&audit, params)?;

    let audit = require(service.update_audit(&flags.actor, id, update).await, "audit", id)?;
    output(&audit, flags.format)
}

/// A single date flag is paired with the audit's stored other date so the
/// range can be checked as a whole.
fn build_update(audit: &Audit, params: &EditParams<'_>) -> anyhow::Result<AuditUpdate> {
    if audit.status == WorkflowStatus::Completed {
        bail!("audit {} is completed; it must be reopened before it can be edited", audit.id);
    }

    let mut builder = AuditUpdateBuilder::new();
    if let Some(title) = params.title {
        if title.trim().is_empty() {
            bail!("title must not be empty");
        }
        builder = builder.title(title);
    }
    if let Some(description) = params.description {
        builder = builder.description((!description.is_empty()).then(|| description.to_string()));
    }
    if let Some(manager) = params.manager {
        builder = builder.manager_id(manager);
    }
    if params.start.is_some() || params.end.is_some() {
        let start = params.start.unwrap_or(audit.start_date);
        let end = params.end.unwrap_or(audit.end_date);
        if end < start {
            bail!("end date {end} is before start date {start}");
        }
        builder = builder.dates(start, end);
    }

    let update = builder.build();
    if update.is_empty() {
        bail!("nothing to edit: pass --title, --description, --manager, --start or --end");
    }
    Ok(update)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use grc_core::entities::Audit;
    use grc_core::enums::{AuditType, WorkflowStatus};
    use pretty_assertions::assert_eq;

    use super::{EditParams, build_update};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).expect("valid date")
    }

    fn audit(status: WorkflowStatus) -> Audit {
        Audit {
            id: "aud-1".into(),
            title: "FY26 audit".into(),
            description: Some("Annual".into()),
            manager_id: "user-m".into(),
            standard_id: None,
            audit_type: AuditType::Implementations,
            status,
            start_date: date(1, 1),
            end_date: date(3, 31),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    const fn params() -> EditParams<'static> {
        EditParams {
            title: None,
            description: None,
            manager: None,
            start: None,
            end: None,
        }
    }

    #[test]
    fn single_date_keeps_the_stored_other_end() {
        let update = build_update(&audit(WorkflowStatus::InProgress), &EditParams {
            end: Some(date(6, 30)),
            ..params()
        })
        .expect("update should build");

        assert_eq!(update.start_date, Some(date(1, 1)));
        assert_eq!(update.end_date, Some(date(6, 30)));
        assert_eq!(update.title, None);
    }

    #[test]
    fn start_after_stored_end_is_rejected() {
        let err = build_update(&audit(WorkflowStatus::NotStarted), &EditParams {
            start: Some(date(4, 1)),
            ..params()
        })
        .expect_err("range should be rejected");
        assert!(err.to_string().contains("before start date"));
    }

    #[test]
    fn empty_description_clears_it() {
        let update = build_update(&audit(WorkflowStatus::NotStarted), &EditParams {
            description: Some(""),
            title: Some("FY26 access audit"),
            ..params()
        })
        .expect("update should build");

        assert_eq!(update.description, Some(None));
        assert_eq!(update.title.as_deref(), Some("FY26 access audit"));
    }

    #[test]
    fn completed_audit_is_not_editable() {
        let err = build_update(&audit(WorkflowStatus::Completed), &EditParams {
            title: Some("Renamed"),
            ..params()
        })
        .expect_err("completed audit should refuse edits");
        assert!(err.to_string().contains("reopened"));
    }

    #[test]
    fn no_flags_is_an_error() {
        let err = build_update(&audit(WorkflowStatus::NotStarted), &params())
            .expect_err("empty edit should fail");
        assert!(err.to_string().starts_with("nothing to edit"));
    }
}
