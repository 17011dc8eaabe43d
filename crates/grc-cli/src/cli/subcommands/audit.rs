use chrono::NaiveDate;
use clap::Subcommand;

/// Audit commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Create an audit and its items in one step.
    Create {
        /// standards or implementations
        #[arg(long = "type")]
        audit_type: String,
        /// Standard under audit (standards audits only)
        #[arg(long)]
        standard: Option<String>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        manager: String,
        /// YYYY-MM-DD
        #[arg(long)]
        start: NaiveDate,
        /// YYYY-MM-DD
        #[arg(long)]
        end: NaiveDate,
        /// Control or implementation id; repeat to select several
        #[arg(long = "target")]
        targets: Vec<String>,
        /// Select every available target instead of listing them
        #[arg(long, conflicts_with = "targets")]
        all: bool,
    },
    /// Change an audit's basic information.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        /// Pass an empty string to clear
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        manager: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,
        /// YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List audits.
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show an audit with its banner and available actions.
    Show { id: String },
    /// List the items of an audit.
    Items { id: String },
    /// Record an assessment on an audit item.
    Assess {
        item: String,
        #[arg(long)]
        applicability: Option<String>,
        #[arg(long)]
        effectiveness: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Start (or, as super admin, reopen) an audit.
    Start { id: String },
    /// Complete an audit and persist its report.
    Complete { id: String },
    /// Write the audit report to stdout or a file.
    Report {
        id: String,
        #[arg(long)]
        out: Option<String>,
    },
    /// Show which workflow actions the actor may take.
    Actions { id: String },
}
