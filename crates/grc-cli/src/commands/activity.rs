use grc_core::enums::{ActivityAction, EntityType};
use grc_db::repos::activity::ActivityFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ActivityArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_opt_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `grc activity`.
pub async fn handle(
    args: &ActivityArgs,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let filter = ActivityFilter {
        entity_type: parse_opt_enum::<EntityType>(args.entity_type.as_deref(), "entity type")?,
        entity_id: args.entity.clone(),
        action: parse_opt_enum::<ActivityAction>(args.action.as_deref(), "action")?,
        actor_id: args.by.clone(),
        limit: Some(effective_limit(args.limit, flags.limit, ctx.default_limit())),
    };
    let entries = ctx.service().query_activity(&filter).await?;
    output(&entries, flags.format)
}
