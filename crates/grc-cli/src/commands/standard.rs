use grc_core::enums::StandardStatus;
use grc_db::repos::standard::NewStandard;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StandardCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::lookup::require;
use crate::commands::shared::parse::{parse_enum, parse_opt_enum};
use crate::context::AppContext;
use crate::output::output;

/// Handle `grc standard`.
pub async fn handle(
    action: &StandardCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service();
    match action {
        StandardCommands::Create {
            code,
            name,
            authority,
            description,
            status,
        } => {
            let input = NewStandard {
                code: code.clone(),
                name: name.clone(),
                authority: authority.clone(),
                description: description.clone(),
                status: parse_enum::<StandardStatus>(status, "status")?,
            };
            let standard = service.create_standard(&flags.actor, &input).await?;
            output(&standard, flags.format)
        }
        StandardCommands::List { status, limit } => {
            let status = parse_opt_enum::<StandardStatus>(status.as_deref(), "status")?;
            let limit = effective_limit(*limit, flags.limit, ctx.default_limit());
            let standards = service.list_standards(status, limit).await?;
            output(&standards, flags.format)
        }
        StandardCommands::Get { id } => {
            let standard = require(service.get_standard(id).await, "standard", id)?;
            output(&standard, flags.format)
        }
        StandardCommands::SetStatus { id, status } => {
            let status = parse_enum::<StandardStatus>(status, "status")?;
            let standard = require(
                service.set_standard_status(&flags.actor, id, status).await,
                "standard",
                id,
            )?;
            output(&standard, flags.format)
        }
    }
}
