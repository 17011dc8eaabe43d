use chrono::NaiveDate;
use grc_core::enums::AuditType;
use grc_workflow::{AuditWizard, BasicInfo, CreateAuditInput};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct CreateParams<'a> {
    pub audit_type: &'a str,
    pub standard: Option<&'a str>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub manager: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub targets: &'a [String],
    pub all: bool,
}

pub async fn run(
    params: &CreateParams<'_>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let audit_type = parse_enum::<AuditType>(params.audit_type, "audit type")?;
    let actor = flags.actor();

    let audit = if params.all {
        let info = AuditWizard::choose_type(audit_type, params.standard.map(String::from))?
            .basic_info(basic_info(params))?;
        let ids: Vec<String> = info
            .scope_options(ctx.service())
            .await?
            .into_iter()
            .filter(|option| option.selected)
            .map(|option| option.auditable.id)
            .collect();
        let draft = info.select_targets(ids)?;
        ctx.engine.submit(&actor, draft).await?
    } else {
        let info = basic_info(params);
        ctx.engine
            .create_audit(
                &actor,
                CreateAuditInput {
                    audit_type,
                    standard_id: params.standard.map(String::from),
                    manager_id: info.manager_id,
                    title: info.title,
                    description: info.description,
                    start_date: info.start_date,
                    end_date: info.end_date,
                    selected_target_ids: params.targets.to_vec(),
                },
            )
            .await?
    };

    output(&audit, flags.format)
}

fn basic_info(params: &CreateParams<'_>) -> BasicInfo {
    BasicInfo {
        title: params.title.to_string(),
        description: params.description.map(String::from),
        manager_id: params.manager.to_string(),
        start_date: params.start,
        end_date: params.end,
    }
}
