use std::path::Path;

use anyhow::bail;
use grc_core::entities::{DataRequest, DataRequestResponse, FileAttachment};
use grc_core::enums::DataRequestStatus;
use grc_db::repos::data_request::{NewAttachment, NewDataRequest};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RequestCommands;
use crate::commands::shared::lookup::require;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RequestDetail {
    request: DataRequest,
    responses: Vec<DataRequestResponse>,
    attachments: Vec<FileAttachment>,
}

/// Handle `grc request`.
pub async fn handle(
    action: &RequestCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service();
    match action {
        RequestCommands::Create {
            item,
            details,
            assignee,
        } => {
            let request = require(
                service
                    .create_data_request(
                        &flags.actor,
                        &NewDataRequest {
                            audit_item_id: item.clone(),
                            assigned_to_id: assignee.clone(),
                            details: details.clone(),
                        },
                    )
                    .await,
                "audit item",
                item,
            )?;
            output(&request, flags.format)
        }
        RequestCommands::Respond { id, text } => {
            require(service.get_data_request(id).await, "data request", id)?;
            let response = service.add_response(&flags.actor, id, text).await?;
            output(&response, flags.format)
        }
        RequestCommands::Attach {
            response,
            file,
            description,
        } => {
            let Some(file_name) = Path::new(file).file_name().and_then(|n| n.to_str()) else {
                bail!("invalid attachment path '{file}'");
            };
            let attachment = service
                .add_attachment(
                    &flags.actor,
                    response,
                    &NewAttachment {
                        file_name: file_name.to_string(),
                        file_path: file.clone(),
                        description: description.clone(),
                    },
                )
                .await?;
            output(&attachment, flags.format)
        }
        RequestCommands::Review { id, status } => {
            let status = parse_enum::<DataRequestStatus>(status, "status")?;
            if !matches!(status, DataRequestStatus::Accepted | DataRequestStatus::Rejected) {
                bail!("a review is either accepted or rejected, not {status}");
            }
            let request = require(
                service.transition_data_request(&flags.actor, id, status).await,
                "data request",
                id,
            )?;
            output(&request, flags.format)
        }
        RequestCommands::List { audit, item } => {
            let requests = match (audit, item) {
                (_, Some(item)) => service.list_data_requests_for_item(item).await?,
                (Some(audit), None) => service.list_data_requests_for_audit(audit).await?,
                (None, None) => bail!("pass --audit or --item"),
            };
            output(&requests, flags.format)
        }
        RequestCommands::Get { id } => {
            let request = require(service.get_data_request(id).await, "data request", id)?;
            let responses = service.list_responses(id).await?;
            let attachments = service.list_attachments(id).await?;
            output(
                &RequestDetail {
                    request,
                    responses,
                    attachments,
                },
                flags.format,
            )
        }
    }
}
