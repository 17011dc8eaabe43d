use anyhow::bail;
use grc_core::enums::{Applicability, Effectiveness, WorkflowStatus};
use grc_db::updates::audit_item::AuditItemUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::require;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    item_id: &str,
    applicability: Option<&str>,
    effectiveness: Option<&str>,
    notes: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service();
    let item = require(service.get_audit_item(item_id).await, "audit item", item_id)?;
    let audit = require(service.get_audit(&item.audit_id).await, "audit", &item.audit_id)?;
    if audit.status == WorkflowStatus::Completed {
        bail!(
            "audit {} is completed; it must be reopened before items can be assessed",
            audit.id
        );
    }

    let mut builder = AuditItemUpdateBuilder::new();
    if let Some(value) = applicability {
        builder = builder.applicability(parse_enum::<Applicability>(value, "applicability")?);
    }
    if let Some(value) = effectiveness {
        builder = builder.effectiveness(parse_enum::<Effectiveness>(value, "effectiveness")?);
    }
    if let Some(value) = notes {
        builder = builder.auditor_notes(Some(value.to_string()));
    }
    let update = builder.build();
    if update.is_empty() {
        bail!("nothing to assess: pass --applicability, --effectiveness or --notes");
    }

    let item = service
        .update_audit_item(&flags.actor, item_id, update)
        .await?;
    output(&item, flags.format)
}
