use grc_core::enums::WorkflowStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_opt_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    status: Option<&str>,
    limit: Option<u32>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let status = parse_opt_enum::<WorkflowStatus>(status, "status")?;
    let limit = effective_limit(limit, flags.limit, ctx.default_limit());
    let audits = ctx.service().list_audits(status, limit).await?;
    output(&audits, flags.format)
}
