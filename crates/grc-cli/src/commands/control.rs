use grc_core::entities::{Control, Implementation};
use grc_core::enums::Effectiveness;
use grc_db::repos::control::NewControl;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ControlCommands;
use crate::commands::shared::lookup::require;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ControlDetail {
    control: Control,
    implementations: Vec<Implementation>,
}

#[derive(Debug, Serialize)]
struct EffectivenessReading {
    control_id: String,
    effectiveness: Effectiveness,
    as_of: Option<chrono::DateTime<chrono::Utc>>,
}

/// Handle `grc control`.
pub async fn handle(
    action: &ControlCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service();
    match action {
        ControlCommands::Create {
            standard,
            code,
            title,
            description,
        } => {
            require(service.get_standard(standard).await, "standard", standard)?;
            let control = service
                .create_control(
                    &flags.actor,
                    &NewControl {
                        standard_id: standard.clone(),
                        code: code.clone(),
                        title: title.clone(),
                        description: description.clone(),
                    },
                )
                .await?;
            output(&control, flags.format)
        }
        ControlCommands::List { standard } => {
            let controls = service.list_controls_for_standard(standard).await?;
            output(&controls, flags.format)
        }
        ControlCommands::Get { id } => {
            let control = require(service.get_control(id).await, "control", id)?;
            let implementations = service.implementations_for_control(id).await?;
            output(
                &ControlDetail {
                    control,
                    implementations,
                },
                flags.format,
            )
        }
        ControlCommands::Link { id, implementation } => {
            require(service.get_control(id).await, "control", id)?;
            require(
                service.get_implementation(implementation).await,
                "implementation",
                implementation,
            )?;
            service
                .link_control_implementation(&flags.actor, id, implementation)
                .await?;
            let implementations = service.implementations_for_control(id).await?;
            output(&implementations, flags.format)
        }
        ControlCommands::Effectiveness { id } => {
            let effectiveness = ctx.engine.control_effectiveness(id).await?;
            let as_of = ctx.engine.control_effectiveness_as_of(id).await?;
            output(
                &EffectivenessReading {
                    control_id: id.clone(),
                    effectiveness,
                    as_of,
                },
                flags.format,
            )
        }
    }
}
