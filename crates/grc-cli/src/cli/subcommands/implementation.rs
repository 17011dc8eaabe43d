use clap::Subcommand;

/// Implementation entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ImplementationCommands {
    /// Record an implementation.
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        details: String,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Update an implementation.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        details: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// List implementations.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an implementation and the controls it satisfies.
    Get { id: String },
}
