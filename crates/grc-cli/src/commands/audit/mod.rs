mod actions;
mod assess;
mod create;
mod edit;
mod items;
mod list;
mod report;
mod show;
mod transition;
mod types;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::context::AppContext;

/// Handle `grc audit`.
pub async fn handle(
    action: &AuditCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuditCommands::Create {
            audit_type,
            standard,
            title,
            description,
            manager,
            start,
            end,
            targets,
            all,
        } => {
            let params = create::CreateParams {
                audit_type,
                standard: standard.as_deref(),
                title,
                description: description.as_deref(),
                manager,
                start: *start,
                end: *end,
                targets,
                all: *all,
            };
            create::run(&params, ctx, flags).await
        }
        AuditCommands::Edit {
            id,
            title,
            description,
            manager,
            start,
            end,
        } => {
            let params = edit::EditParams {
                title: title.as_deref(),
                description: description.as_deref(),
                manager: manager.as_deref(),
                start: *start,
                end: *end,
            };
            edit::run(id, &params, ctx, flags).await
        }
        AuditCommands::List { status, limit } => {
            list::run(status.as_deref(), *limit, ctx, flags).await
        }
        AuditCommands::Show { id } => show::run(id, ctx, flags).await,
        AuditCommands::Items { id } => items::run(id, ctx, flags).await,
        AuditCommands::Assess {
            item,
            applicability,
            effectiveness,
            notes,
        } => {
            assess::run(
                item,
                applicability.as_deref(),
                effectiveness.as_deref(),
                notes.as_deref(),
                ctx,
                flags,
            )
            .await
        }
        AuditCommands::Start { id } => transition::start(id, ctx, flags).await,
        AuditCommands::Complete { id } => transition::complete(id, ctx, flags).await,
        AuditCommands::Report { id, out } => report::run(id, out.as_deref(), ctx, flags).await,
        AuditCommands::Actions { id } => actions::run(id, ctx, flags).await,
    }
}
