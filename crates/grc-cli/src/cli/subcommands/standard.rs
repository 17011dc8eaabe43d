use clap::Subcommand;

/// Standard entity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StandardCommands {
    /// Register a standard.
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        authority: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// in_scope, out_of_scope or draft
        #[arg(long, default_value = "in_scope")]
        status: String,
    },
    /// List standards.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a standard by ID.
    Get { id: String },
    /// Change a standard's scope status.
    SetStatus { id: String, status: String },
}
