use std::io::Write as _;

use anyhow::Context;

use super::types::ReportWritten;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    out: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let bytes = ctx.engine.get_report(id).await?;

    match out {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("failed to write report to {path}"))?;
            output(
                &ReportWritten {
                    audit_id: id.to_string(),
                    path: path.to_string(),
                    bytes: bytes.len(),
                },
                flags.format,
            )
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}
