use grc_core::entities::{Control, Implementation};
use grc_core::enums::ImplementationStatus;
use grc_db::repos::implementation::NewImplementation;
use grc_db::updates::implementation::ImplementationUpdateBuilder;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ImplementationCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::lookup::require;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ImplementationDetail {
    implementation: Implementation,
    controls: Vec<Control>,
}

/// Handle `grc implementation`.
pub async fn handle(
    action: &ImplementationCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service();
    match action {
        ImplementationCommands::Create {
            code,
            title,
            details,
            notes,
        } => {
            let implementation = service
                .create_implementation(
                    &flags.actor,
                    &NewImplementation {
                        code: code.clone(),
                        title: title.clone(),
                        details: details.clone(),
                        notes: notes.clone(),
                    },
                )
                .await?;
            output(&implementation, flags.format)
        }
        ImplementationCommands::Update {
            id,
            title,
            details,
            notes,
            status,
        } => {
            let mut builder = ImplementationUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title);
            }
            if let Some(details) = details {
                builder = builder.details(details);
            }
            if let Some(notes) = notes {
                builder = builder.notes(Some(notes.clone()));
            }
            if let Some(status) = status {
                builder = builder.status(parse_enum::<ImplementationStatus>(status, "status")?);
            }

            let implementation = require(
                service
                    .update_implementation(&flags.actor, id, builder.build())
                    .await,
                "implementation",
                id,
            )?;
            output(&implementation, flags.format)
        }
        ImplementationCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.default_limit());
            let implementations = service.list_implementations(limit).await?;
            output(&implementations, flags.format)
        }
        ImplementationCommands::Get { id } => {
            let implementation = require(service.get_implementation(id).await, "implementation", id)?;
            let controls = service.controls_for_implementation(id).await?;
            output(
                &ImplementationDetail {
                    implementation,
                    controls,
                },
                flags.format,
            )
        }
    }
}
