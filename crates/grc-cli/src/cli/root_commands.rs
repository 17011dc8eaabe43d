use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AuditCommands, ControlCommands, ImplementationCommands, RequestCommands, StandardCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Compliance standards.
    Standard {
        #[command(subcommand)]
        action: StandardCommands,
    },
    /// Controls of a standard.
    Control {
        #[command(subcommand)]
        action: ControlCommands,
    },
    /// Organizational implementations.
    Implementation {
        #[command(subcommand)]
        action: ImplementationCommands,
    },
    /// Audits and their workflow.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Evidence requests raised against audit items.
    Request {
        #[command(subcommand)]
        action: RequestCommands,
    },
    /// Query the activity log.
    Activity(ActivityArgs),
}

/// Filters for `grc activity`.
#[derive(Clone, Debug, Args)]
pub struct ActivityArgs {
    /// Entity type (audit, audit_item, implementation, ...)
    #[arg(long)]
    pub entity_type: Option<String>,
    /// Entity id
    #[arg(long)]
    pub entity: Option<String>,
    /// Action (created, updated, status_changed, ...)
    #[arg(long)]
    pub action: Option<String>,
    /// Only entries made by this user
    #[arg(long)]
    pub by: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}
