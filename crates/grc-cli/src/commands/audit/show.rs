use grc_workflow::status_banner;

use super::types::AuditView;
use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::require;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let audit = require(ctx.service().get_audit(id).await, "audit", id)?;
    let actions = ctx.engine.available_actions(id, &flags.actor()).await?;
    let item_count = ctx.service().list_audit_items(id).await?.len();

    output(
        &AuditView {
            banner: status_banner(audit.status),
            audit,
            actions,
            item_count,
        },
        flags.format,
    )
}
