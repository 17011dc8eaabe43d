use super::types::ItemRow;
use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::require;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = ctx.service();
    require(service.get_audit(id).await, "audit", id)?;

    let mut rows = Vec::new();
    for item in service.list_audit_items(id).await? {
        let target = require(
            service.resolve_auditable(&item.auditable).await,
            item.auditable.kind.as_str(),
            &item.auditable.id,
        )?;
        rows.push(ItemRow {
            code: target.code().to_string(),
            title: target.title().to_string(),
            item,
        });
    }

    output(&rows, flags.format)
}
