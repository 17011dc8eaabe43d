use clap::ValueEnum;
use grc_core::identity::{Actor, Role};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub limit: Option<u32>,
    pub actor: String,
    pub super_admin: bool,
}

impl GlobalFlags {
    /// The acting user every mutation is attributed to.
    #[must_use]
    pub fn actor(&self) -> Actor {
        let mut roles = vec![Role::User];
        if self.super_admin {
            roles.push(Role::SuperAdmin);
        }
        Actor::new(self.actor.clone(), roles)
    }
}
