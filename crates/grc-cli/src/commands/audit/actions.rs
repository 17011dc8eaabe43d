use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let actions = ctx.engine.available_actions(id, &flags.actor()).await?;
    output(&actions, flags.format)
}
