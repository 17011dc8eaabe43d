use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `grc` binary.
#[derive(Debug, Parser)]
#[command(name = "grc", version, about = "GRC - compliance audit workflow")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// User id the command acts as
    #[arg(long, global = true, default_value = "operator")]
    pub actor: String,

    /// Act with the super admin role
    #[arg(long, global = true)]
    pub super_admin: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            actor: self.actor.clone(),
            super_admin: self.super_admin,
        }
    }
}
