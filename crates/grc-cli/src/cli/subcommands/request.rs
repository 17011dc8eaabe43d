use clap::{ArgGroup, Subcommand};

/// Data request commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RequestCommands {
    /// Raise a data request against an audit item.
    Create {
        #[arg(long)]
        item: String,
        #[arg(long)]
        details: String,
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Respond to a data request.
    Respond {
        id: String,
        #[arg(long)]
        text: String,
    },
    /// Attach a file reference to a response.
    Attach {
        response: String,
        #[arg(long)]
        file: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Accept or reject a responded request.
    Review {
        id: String,
        /// accepted or rejected
        #[arg(long)]
        status: String,
    },
    /// List the data requests of an audit or an item.
    #[command(group(ArgGroup::new("scope").required(true).args(["audit", "item"])))]
    List {
        #[arg(long)]
        audit: Option<String>,
        #[arg(long)]
        item: Option<String>,
    },
    /// Show a request with its responses and attachments.
    Get { id: String },
}
