use clap::Subcommand;

/// Control entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ControlCommands {
    /// Add a control to a standard.
    Create {
        #[arg(long)]
        standard: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// List the controls of a standard.
    List {
        #[arg(long)]
        standard: String,
    },
    /// Get a control by ID.
    Get { id: String },
    /// Link a control to an implementation.
    Link {
        id: String,
        #[arg(long)]
        implementation: String,
    },
    /// Show the effectiveness derived from the latest completed audit.
    Effectiveness { id: String },
}
