use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Standard { action } => commands::standard::handle(&action, ctx, flags).await,
        Commands::Control { action } => commands::control::handle(&action, ctx, flags).await,
        Commands::Implementation { action } => {
            commands::implementation::handle(&action, ctx, flags).await
        }
        Commands::Audit { action } => commands::audit::handle(&action, ctx, flags).await,
        Commands::Request { action } => commands::request::handle(&action, ctx, flags).await,
        Commands::Activity(args) => commands::activity::handle(&args, ctx, flags).await,
    }
}
