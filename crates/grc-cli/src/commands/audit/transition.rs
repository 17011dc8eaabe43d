use anyhow::bail;
use grc_workflow::ReportStore;

use super::types::TransitionResponse;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// `grc audit start`.
pub async fn start(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = ctx.engine.start(id, &flags.actor()).await?;
    respond(TransitionResponse::from_outcome(outcome, None), flags)
}

/// `grc audit complete`.
pub async fn complete(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = ctx.engine.complete(id, &flags.actor()).await?;
    let report_path = outcome
        .is_transitioned()
        .then(|| ReportStore::relative_path(id));
    respond(TransitionResponse::from_outcome(outcome, report_path), flags)
}

fn respond(response: TransitionResponse, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&response, flags.format)?;
    if let Some(reason) = response.refusal() {
        bail!("refused: {reason}");
    }
    Ok(())
}
